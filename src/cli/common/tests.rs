// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::*;

#[test]
fn test_arg_file_types() {
    assert_eq!(ARG_FILE_TYPES_COMMA_SEPARATED.as_str(), "toml, json");
    assert!(matches!(
        ArgFileTypes::from_str("toml"),
        Ok(ArgFileTypes::Toml)
    ));
    assert!(matches!(
        ArgFileTypes::from_str("json"),
        Ok(ArgFileTypes::Json)
    ));
    assert!(ArgFileTypes::from_str("yaml").is_err());
}

#[test]
fn test_info_printer_handles_empty_and_mixed_blocks() {
    // Nothing is logged in tests, but this shouldn't panic.
    InfoPrinter::new("Empty".into()).display();

    let mut printer = InfoPrinter::new("Mixed".into());
    printer.push_line("one line".into());
    printer.push_block(vec!["first".into(), "second".into()]);
    printer.push_block(vec![]);
    printer.display();
}
