use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use lessgate::errors::{LessgateError, Result};
use lessgate::exec::CompileInvoker;
use lessgate::types::WorkItem;

/// A fake invoker that:
/// - records every work item it is asked to compile
/// - succeeds, unless the item's source is in `fail_on`, in which case it
///   reports an `Invocation` error the way a crashing compiler would.
#[derive(Debug, Clone, Default)]
pub struct RecordingInvoker {
    compiled: Arc<Mutex<Vec<WorkItem>>>,
    fail_on: Vec<PathBuf>,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, source: &str) -> Self {
        self.fail_on.push(PathBuf::from(source));
        self
    }

    /// Shared view of everything compiled so far.
    pub fn compiled(&self) -> Arc<Mutex<Vec<WorkItem>>> {
        Arc::clone(&self.compiled)
    }
}

impl CompileInvoker for RecordingInvoker {
    fn compile<'a>(
        &'a mut self,
        item: &'a WorkItem,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.compiled.lock().unwrap().push(item.clone());
            if self.fail_on.contains(&item.source) {
                return Err(LessgateError::Invocation {
                    program: "fake-node".to_string(),
                    source_path: item.source.clone(),
                    reason: "compiler exited with exit status: 1".to_string(),
                });
            }
            Ok(())
        })
    }
}
