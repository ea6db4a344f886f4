mod test_filter_config;
