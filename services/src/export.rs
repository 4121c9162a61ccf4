//! Writing listens in the `ListenBrainz` import format

use std::{
    fs::File,
    io::{
        self,
        BufWriter,
        Write,
    },
    path::Path,
};

use anyhow::Result;
use lfm_import_core::{
    ListenData,
    ListenPayload,
};
use serde::Serialize;
use serde_json::ser::{
    Formatter,
    Serializer,
};
use zip::{
    write::SimpleFileOptions,
    CompressionMethod,
    DateTime,
    ZipWriter,
};

/// Name the import expects for the listens file inside the archive
pub const ARCHIVE_ENTRY: &str = "listens.jsonl";


/// Single-line JSON with a space after every `:` and `,`
///
/// `{"listened_at": 1000, "track_metadata": {"track_name": "Song A", ...}}`
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}


/// Writes each listen as a single line of JSON, in order
///
/// Non-ASCII text is written as is. Returns the number of lines written.
pub fn write_listens<W, L>(mut out: W, listens: impl IntoIterator<Item = L>) -> io::Result<usize>
where
    W: Write,
    L: ListenData,
{
    let mut written = 0;
    for listen in listens {
        ListenPayload(&listen).serialize(&mut Serializer::with_formatter(&mut out, SpacedFormatter))?;
        out.write_all(b"\n")?;
        written += 1;
    }
    Ok(written)
}

/// Creates or truncates the file at `path` and writes `listens` to it as JSON lines
///
/// # Errors
///
/// This function will return an error if the file can't be created or written.
pub fn write_jsonl<L: ListenData>(path: &Path, listens: impl IntoIterator<Item = L>) -> Result<usize> {
    let mut out = File::create(path).map(BufWriter::new)?;
    let written = write_listens(&mut out, listens)?;
    out.flush()?;
    Ok(written)
}

/// Packages the JSON lines file at `jsonl` into a new zip archive at `archive`
///
/// The archive holds a single deflated [`ARCHIVE_ENTRY`], stamped with the zip epoch so
/// the same listens always produce the same archive.
///
/// # Errors
///
/// This function will return an error if `jsonl` can't be read or `archive` can't be written.
pub fn package(jsonl: &Path, archive: &Path) -> Result<()> {
    let mut src = File::open(jsonl)?;
    let mut zip = ZipWriter::new(File::create(archive)?);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    zip.start_file(ARCHIVE_ENTRY, options)?;
    io::copy(&mut src, &mut zip)?;
    zip.finish()?;
    Ok(())
}
