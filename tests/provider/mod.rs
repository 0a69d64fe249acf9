mod tests_concurrency;
mod tests_editing;
mod tests_files;
