use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::args::ExportMethodType;
use log::debug;

pub struct OutputWriter {
    writer: BufWriter<Box<dyn Write>>,
}

impl OutputWriter {
    pub fn new(export_type: ExportMethodType, file_path: &str) -> io::Result<Self> {
        let writer: BufWriter<Box<dyn Write>> = match export_type {
            ExportMethodType::File => {
                debug!("Creating report file {:?}", file_path);
                let file = File::create(file_path)?;
                BufWriter::new(Box::new(file))
            }
            ExportMethodType::Print => BufWriter::new(Box::new(io::stdout())),
        };

        Ok(OutputWriter { writer })
    }

    pub fn write_report(&mut self, report: &str) -> io::Result<()> {
        debug!("Writing report to output");
        self.writer.write_all(report.as_bytes())
    }

    /// Flushes the writer and closes the output file
    pub fn flush_and_close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
