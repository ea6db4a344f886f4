mod test_config;
mod test_fixes_csv;
