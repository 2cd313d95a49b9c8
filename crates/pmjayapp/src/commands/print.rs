use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PmjayError, Result};
use crate::print::Printer;
use std::path::Path;

pub fn run<P: Printer>(printer: &P, document: &Path) -> Result<CmdResult> {
    if !document.exists() {
        return Err(PmjayError::Print(format!(
            "document {} does not exist",
            document.display()
        )));
    }
    printer.print(document)?;

    let mut result = CmdResult {
        document: Some(document.to_path_buf()),
        ..Default::default()
    };
    result.add_message(CmdMessage::success(format!(
        "Sent {} to the printer",
        document.display()
    )));
    Ok(result)
}
