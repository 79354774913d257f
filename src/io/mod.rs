// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for file input/output.

mod fits;
mod table;

pub use fits::FitsError;
pub use table::{
    default_output_filename, read_table, read_table_cmdline, write_table, TableReadError,
    TableWriteError, TABLE_HDU_NAME,
};
