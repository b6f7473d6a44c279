//! Converter registry tests.
