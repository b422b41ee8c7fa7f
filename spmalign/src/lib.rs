//! Configuration, data sets, and output of sentencepiece tokenization.

pub mod config;

pub mod dataset;

pub mod error;

pub mod output;
