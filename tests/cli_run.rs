#![cfg(unix)]

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::tempdir;

use lessgate::cli::CliArgs;
use lessgate::errors::LessgateError;
use lessgate::run;

type TestResult = Result<(), Box<dyn Error>>;

fn args(config: &Path, extra: &[&str]) -> CliArgs {
    let config = config.display().to_string();
    let mut argv = vec!["lessgate", "--config", config.as_str()];
    argv.extend_from_slice(extra);
    CliArgs::parse_from(argv)
}

#[tokio::test]
async fn once_compiles_configured_pair_end_to_end() -> TestResult {
    with_timeout(async {
        init_tracing();

        let project = tempdir()?;
        let root = project.path();
        fs::create_dir_all(root.join("assets"))?;
        fs::write(root.join("assets/main.less"), "@x: 1;")?;
        fs::write(root.join("compile.sh"), r#"printf 'compiled %s' "$(basename "$1")" > "$2""#)?;
        fs::write(
            root.join("Lessgate.toml"),
            r#"
[config]
executable = "/bin/sh"
script = "compile.sh"
timeout = "5s"

[source]
mode = "pair"
source = "assets/main.less"
destination = "static/bundle.css"
"#,
        )?;

        run(args(&root.join("Lessgate.toml"), &["--once"])).await?;

        let css = fs::read_to_string(root.join("static/bundle.css"))?;
        assert_eq!(css, "compiled main.less");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn once_without_root_stylesheet_fails() -> TestResult {
    with_timeout(async {
        init_tracing();

        let project = tempdir()?;
        let root = project.path();
        fs::write(root.join("theme.less"), "")?;
        fs::write(root.join("Lessgate.toml"), "[config]\nexecutable = \"/bin/sh\"\n")?;

        let err = run(args(&root.join("Lessgate.toml"), &["--once", "--full"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LessgateError>(),
            Some(LessgateError::NotFound { .. })
        ));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn dry_run_executes_nothing() -> TestResult {
    with_timeout(async {
        init_tracing();

        let project = tempdir()?;
        let root = project.path();
        fs::write(root.join("app.less"), "")?;
        fs::write(root.join("compile.sh"), r#"touch "$2""#)?;
        fs::write(
            root.join("Lessgate.toml"),
            "[config]\nexecutable = \"/bin/sh\"\nscript = \"compile.sh\"\n",
        )?;

        run(args(&root.join("Lessgate.toml"), &["--dry-run"])).await?;
        assert!(!root.join("app.css").exists());
        Ok(())
    })
    .await
}
