// Errors that cannot be returned to the caller are reported on stderr.
#[derive(Copy, Clone, Debug)]
pub(crate) enum ErrorCode {
    Write,
    Flush,
    Poison,
}

pub(crate) fn eprint_err(error_code: ErrorCode, msg: &str, err: &dyn std::error::Error) {
    eprintln!("[file_group_logger][ERRCODE::{error_code:?}] {msg}, caused by {err}");
}

pub(crate) fn eprint_msg(error_code: ErrorCode, msg: &str) {
    eprintln!("[file_group_logger][ERRCODE::{error_code:?}] {msg}");
}
