pub mod find_or_fail;
