//! Parsing the Gene Ontology and raw prediction data

pub mod go_obo;

pub use go_obo::{Edge, ParsedOntology, ParsedTerm};

/// Module to parse raw protein - GO term predictions
///
/// The input is a tab separated file, e.g. a `QuickGO` annotation export.
/// Only the second (protein) and third (GO term) columns are used. Every
/// line is a prediction with the score [`RAW_SCORE`](crate::RAW_SCORE).
///
/// ```text
/// UniProtKB   P12345  GO:0005739  mitochondrion
/// UniProtKB   P12345  GO:0003824  catalytic activity
/// UniProtKB   Q67890  GO:0006412  translation
/// ```
pub mod predictions {
    use std::fs::File;
    use std::io::{BufRead, BufReader, Lines};
    use std::path::Path;

    use crate::predictions::{ProteinId, RawPrediction};
    use crate::term::GoTermId;
    use crate::{GoError, GoResult, RAW_SCORE};

    /// Parses a single line of a prediction file
    ///
    /// Returns `Ok(None)` for empty lines
    ///
    /// # Errors
    ///
    /// [`GoError::InvalidInput`] if the line has fewer than three columns
    ///
    /// # Examples
    ///
    /// ```
    /// use gopath::parser::predictions::parse_line;
    ///
    /// let prediction = parse_line("UniProtKB\tP12345\tGO:0005739\n")
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(prediction.protein().as_str(), "P12345");
    /// assert_eq!(prediction.term().as_str(), "GO:0005739");
    ///
    /// assert!(parse_line("").unwrap().is_none());
    /// assert!(parse_line("UniProtKB\tP12345").is_err());
    /// ```
    pub fn parse_line(line: &str) -> GoResult<Option<RawPrediction>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let mut cols = line.split('\t');

        // Column 1 is the source database, not needed
        if cols.next().is_none() {
            return Err(GoError::InvalidInput(line.to_string()));
        }

        // Column 2 is the protein
        let Some(protein) = cols.next() else {
            return Err(GoError::InvalidInput(line.to_string()));
        };

        // Column 3 is the GO term, possibly followed by the line break
        let Some(term) = cols.next() else {
            return Err(GoError::InvalidInput(line.to_string()));
        };

        Ok(Some(RawPrediction::new(
            ProteinId::from(protein),
            GoTermId::from(term.trim()),
            RAW_SCORE,
        )))
    }

    /// Iterator of [`RawPrediction`]s from a reader
    ///
    /// Created by [`read`]. Stops at the end of the reader, every
    /// invalid line yields an error.
    pub struct Predictions<R> {
        lines: Lines<R>,
        line_number: usize,
    }

    impl<R: BufRead> Iterator for Predictions<R> {
        type Item = GoResult<RawPrediction>;

        fn next(&mut self) -> Option<Self::Item> {
            for line in self.lines.by_ref() {
                self.line_number += 1;
                let line = match line {
                    Ok(line) => line,
                    Err(_) => {
                        return Some(Err(GoError::InvalidInput(format!(
                            "unable to read prediction line {}",
                            self.line_number
                        ))))
                    }
                };
                match parse_line(&line) {
                    Ok(Some(prediction)) => return Some(Ok(prediction)),
                    Ok(None) => continue,
                    Err(err) => return Some(Err(err)),
                }
            }
            None
        }
    }

    impl<R> std::fmt::Debug for Predictions<R> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "Predictions at line {}", self.line_number)
        }
    }

    /// Reads predictions line by line from `reader`
    pub fn read<R: BufRead>(reader: R) -> Predictions<R> {
        Predictions {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Opens a prediction file and returns an iterator of its predictions
    ///
    /// # Errors
    ///
    /// [`GoError::CannotOpenFile`]: the file is not present or can't be opened
    pub fn read_file<P: AsRef<Path>>(file: P) -> GoResult<Predictions<BufReader<File>>> {
        let filename = file.as_ref().display().to_string();
        let file = File::open(file).map_err(|_| GoError::CannotOpenFile(filename))?;
        Ok(read(BufReader::new(file)))
    }

}
