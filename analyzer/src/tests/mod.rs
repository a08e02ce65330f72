#[cfg(test)]
mod common;
#[cfg(test)]
mod test_errors;
#[cfg(test)]
mod test_lexer;
#[cfg(test)]
mod test_parser;
#[cfg(test)]
mod test_semantic;
#[cfg(test)]
mod test_token_query;
