mod common;

mod nan_handling;
