mod test_utils;

use file_group_logger::{Context, FileLogger, Severity};
use log::{debug, error, info, trace, warn};

// The global logger can only be installed once per process,
// so this is the only test in this binary.
#[test]
fn test_log_macros() {
    let dir = test_utils::dir();
    let logger = FileLogger::builder(dir.path())
        .no_file_groups()
        .filename("macros")
        .log_format("{level} {message}")
        .threshold(Severity::Info)
        .try_build()
        .unwrap();
    let path = logger.log_file_path_for(Severity::Info).unwrap().to_path_buf();
    assert_eq!(path, dir.path().join("macros.txt"));

    let handle = logger.start().unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    error!("This is an error message");
    warn!("This is a warning");
    info!("This is an info message");
    debug!("This is a debug message - you must not see it!");
    trace!("This is a trace message - you must not see it!");
    assert_eq!(handle.last_logged_line(), "INFO This is an info message");

    handle
        .log(Severity::Critical, "not expressible with log", &Context::new())
        .unwrap();

    handle.set_threshold(Severity::Debug);
    assert_eq!(log::max_level(), log::LevelFilter::Trace);
    trace!("Now a trace message is visible");
    assert_eq!(handle.with_logger(|l| l.line_count()), 5);

    // a second logger cannot be installed
    let other = FileLogger::builder(dir.path())
        .filename("other")
        .no_file_groups()
        .try_build()
        .unwrap();
    assert!(other.start().is_err());

    handle.flush().unwrap();
    assert_eq!(
        test_utils::read(&path),
        "ERROR This is an error message\n\
         WARNING This is a warning\n\
         INFO This is an info message\n\
         CRITICAL not expressible with log\n\
         DEBUG Now a trace message is visible\n"
    );
}
