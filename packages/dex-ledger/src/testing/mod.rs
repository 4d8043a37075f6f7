mod mock;
mod token_registry_tests;
