mod test_utils;

use file_group_logger::{Context, DestinationKey, FileLogger, Severity};

#[test]
fn test_flush_every_third_line() {
    let dir = test_utils::dir();
    let mut logger = FileLogger::builder(dir.path())
        .no_file_groups()
        .filename("flush.log")
        .log_format("{message}")
        .flush_frequency(3)
        .try_build()
        .unwrap();
    let path = logger
        .log_file_path(DestinationKey::Default)
        .unwrap()
        .to_path_buf();

    let mut expected = String::new();
    for i in 1..=7 {
        logger.info(&format!("line {i}"), &Context::new()).unwrap();
        expected.push_str(&format!("line {i}\n"));
        // every line is readable right away, the frequency only drives the syncs
        assert_eq!(test_utils::read(&path), expected, "after line {i}");
        assert_eq!(logger.sync_count(), i / 3, "after line {i}");
    }
    assert_eq!(logger.line_count(), 7);
}

#[test]
fn test_counter_spans_destinations() {
    let dir = test_utils::dir();
    let mut logger = FileLogger::builder(dir.path())
        .filename("app.log")
        .log_format("{message}")
        .flush_frequency(2)
        .try_build()
        .unwrap();
    let error_path = logger.log_file_path_for(Severity::Error).unwrap().to_path_buf();
    let info_path = logger.log_file_path_for(Severity::Info).unwrap().to_path_buf();

    logger.error("first", &Context::new()).unwrap();
    assert_eq!(logger.sync_count(), 0);
    // the second line overall triggers a sync, although it goes to another file
    logger.info("second", &Context::new()).unwrap();
    assert_eq!(logger.sync_count(), 1);
    assert_eq!(test_utils::read(&error_path), "first\n");
    assert_eq!(test_utils::read(&info_path), "second\n");

    logger.error("third", &Context::new()).unwrap();
    logger.error("fourth", &Context::new()).unwrap();
    assert_eq!(logger.sync_count(), 2);
    assert_eq!(test_utils::read(&error_path), "first\nthird\nfourth\n");
}

#[test]
fn test_no_flush_without_frequency() {
    let dir = test_utils::dir();
    let mut logger = FileLogger::builder(dir.path())
        .no_file_groups()
        .try_build()
        .unwrap();
    let path = logger
        .log_file_path(DestinationKey::Default)
        .unwrap()
        .to_path_buf();
    for _ in 0..10 {
        logger.info("unsynced", &Context::new()).unwrap();
    }
    assert_eq!(logger.sync_count(), 0);
    assert_eq!(test_utils::read(&path).lines().count(), 10);
}

#[test]
fn test_discarded_lines_do_not_count() {
    let dir = test_utils::dir();
    let mut logger = FileLogger::builder(dir.path())
        .no_file_groups()
        .threshold(Severity::Warning)
        .flush_frequency(1)
        .try_build()
        .unwrap();
    logger.debug("discarded", &Context::new()).unwrap();
    assert_eq!(logger.sync_count(), 0);
    logger.warning("kept", &Context::new()).unwrap();
    assert_eq!(logger.sync_count(), 1);
}
