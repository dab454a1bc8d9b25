pub mod test_string;

/// Route `log` output through the test harness.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
