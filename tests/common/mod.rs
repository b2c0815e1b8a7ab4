#![allow(unused_imports)]

pub use lessgate_test_utils::{builders, fake_invoker, init_tracing, with_timeout};
