mod test_sampling_basic;
