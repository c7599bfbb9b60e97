mod test_utils;

use file_group_logger::{Context, FileLogger, Severity, MEMORY};

#[test]
fn test_less_severe_is_discarded() {
    for threshold in Severity::ALL {
        for severity in Severity::ALL {
            let mut logger = FileLogger::try_new(MEMORY, threshold).unwrap();
            logger.log(severity, "msg", &Context::new()).unwrap();
            let written = !logger.memory_contents().unwrap().is_empty();
            assert_eq!(
                written,
                severity.rank() <= threshold.rank(),
                "threshold {threshold}, severity {severity}"
            );
        }
    }
}

#[test]
fn test_debug_dropped_with_info_threshold() {
    let dir = test_utils::dir();
    let mut logger = FileLogger::try_new(dir.path(), Severity::Info).unwrap();
    logger.debug("x", &Context::new()).unwrap();
    assert_eq!(logger.line_count(), 0);
    assert_eq!(logger.last_logged_line(), "");
    let path = logger.log_file_path_for(Severity::Debug).unwrap().to_path_buf();
    drop(logger);
    assert_eq!(test_utils::read(&path), "");
}

#[test]
fn test_raw_write_ignores_threshold() {
    let mut logger = FileLogger::try_new(MEMORY, Severity::Emergency).unwrap();
    let key = logger.destination_for(Severity::Debug);
    logger.write("preformatted\n", key).unwrap();
    assert_eq!(logger.memory_contents().unwrap(), "preformatted\n");
    assert_eq!(logger.last_logged_line(), "preformatted");
}
