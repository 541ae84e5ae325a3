pub mod title_reader;
