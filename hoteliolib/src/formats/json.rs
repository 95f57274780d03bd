//! Снимок набора данных в JSON — переносимый вид локального хранилища.

use crate::{
    error::Result,
    model::Dataset,
    traits::{ReadFormat, WriteFormat},
};
use std::io::{BufRead, Write};

pub struct Json;

impl ReadFormat for Json {
    fn read<R: BufRead>(r: R) -> Result<Dataset> {
        Ok(serde_json::from_reader(r)?)
    }
}

impl WriteFormat for Json {
    fn write<W: Write>(w: W, ds: &Dataset) -> Result<()> {
        serde_json::to_writer_pretty(w, ds)?;
        Ok(())
    }
}
