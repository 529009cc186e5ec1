//! # patent-parser
//!
//! Splits the flat text an OCR/layout engine produces for a patent into its description, claims
//! and abstract.
//!
//! File Layout
//!
//! The work happens in two passes over a single string, and the layout follows them:
//! src/patent
//!   ├── cleaning       Markup and numbering removal (images, tables, headings, line numbers)
//!   ├── segmentation   Header matchers, abstract extraction and the section splitter
//!   ├── extraction     The `TextExtractor` capability and its adapters
//!   ├── persistence    Opt-in writing of sections to named slots
//!   └── pipeline       `DocumentReader`, which wires the above together
//!
//! Everything under cleaning and segmentation is pure and total: any string in, a best-effort
//! result out. Only extraction and persistence touch the filesystem, and they report failures as
//! explicit errors.
//!
//! For fixtures and assertion helpers used across the test suites, see the
//! [testing module](patent::testing).

pub mod patent;
