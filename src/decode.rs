use std::io::Write;

use enough::Stop;

use crate::bmp::{self, BmpPermissiveness, DibHeader, FileHeader, ScanReport};
use crate::error::BmpDumpError;
use crate::limits::Limits;
use crate::pixel::{Channels, PixelRecord};
use crate::source::ByteSource;

/// Everything learned from one pass over a BMP stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpOutput {
    /// Total stream length, when the source knew it.
    pub stream_len: Option<u64>,
    pub file_header: FileHeader,
    pub dib_header: DibHeader,
    /// Stream position where row decoding began (54 for any complete header).
    pub data_start: u64,
    pub scan: ScanReport,
}

/// Builder for decoding a BMP stream into pixel records or a text dump.
#[derive(Clone, Debug, Default)]
pub struct DumpRequest {
    permissiveness: BmpPermissiveness,
    channels: Channels,
    limits: Option<Limits>,
}

impl DumpRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Channels written per line by [`DumpRequest::dump`].
    pub fn channels(mut self, channels: Channels) -> Self {
        self.channels = channels;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read and validate both headers, leaving `source` at the first row.
    pub fn read_headers<S>(&self, source: &mut S) -> Result<(FileHeader, DibHeader), BmpDumpError>
    where
        S: ByteSource + ?Sized,
    {
        let file = bmp::read_file_header(source)?;
        let dib = bmp::read_dib_header(source)?;
        bmp::validate_headers(&file, &dib, self.permissiveness)?;
        if let Some(limits) = &self.limits {
            limits.check(dib.width, dib.height)?;
        }
        Ok((file, dib))
    }

    /// Decode headers and rows, handing each pixel to `emit` in file order.
    pub fn scan<S, F>(
        &self,
        source: &mut S,
        stop: impl Stop,
        emit: F,
    ) -> Result<DumpOutput, BmpDumpError>
    where
        S: ByteSource + ?Sized,
        F: FnMut(PixelRecord) -> Result<(), BmpDumpError>,
    {
        let headers = self.read_headers(source)?;
        self.scan_rows(source, headers, stop, emit)
    }

    /// Decode the rows that follow `headers`, which must have come from
    /// [`DumpRequest::read_headers`] on the same `source`.
    pub fn scan_rows<S, F>(
        &self,
        source: &mut S,
        (file_header, dib_header): (FileHeader, DibHeader),
        stop: impl Stop,
        emit: F,
    ) -> Result<DumpOutput, BmpDumpError>
    where
        S: ByteSource + ?Sized,
        F: FnMut(PixelRecord) -> Result<(), BmpDumpError>,
    {
        let data_start = source.position();
        stop.check()?;
        let scan = bmp::decode_rows(source, &dib_header, &stop, emit)?;
        Ok(DumpOutput {
            stream_len: source.len_hint(),
            file_header,
            dib_header,
            data_start,
            scan,
        })
    }

    /// Decode `source` and write one text line per pixel to `out`.
    pub fn dump<S, W>(
        &self,
        source: &mut S,
        out: &mut W,
        stop: impl Stop,
    ) -> Result<DumpOutput, BmpDumpError>
    where
        S: ByteSource + ?Sized,
        W: Write + ?Sized,
    {
        let headers = self.read_headers(source)?;
        self.dump_rows(source, headers, out, stop)
    }

    /// Text-dump counterpart of [`DumpRequest::scan_rows`]. Nothing is
    /// written to `out` before the first row is read.
    pub fn dump_rows<S, W>(
        &self,
        source: &mut S,
        headers: (FileHeader, DibHeader),
        out: &mut W,
        stop: impl Stop,
    ) -> Result<DumpOutput, BmpDumpError>
    where
        S: ByteSource + ?Sized,
        W: Write + ?Sized,
    {
        let channels = self.channels;
        let output = self.scan_rows(source, headers, stop, |pixel| {
            pixel
                .write_line(&mut *out, channels)
                .map_err(BmpDumpError::Sink)
        })?;
        out.flush().map_err(BmpDumpError::Sink)?;
        Ok(output)
    }

    /// Decode `source` and collect every pixel.
    pub fn collect<S>(
        &self,
        source: &mut S,
        stop: impl Stop,
    ) -> Result<(DumpOutput, Vec<PixelRecord>), BmpDumpError>
    where
        S: ByteSource + ?Sized,
    {
        let mut pixels = Vec::new();
        let output = self.scan(source, stop, |pixel| {
            pixels.push(pixel);
            Ok(())
        })?;
        Ok((output, pixels))
    }
}
