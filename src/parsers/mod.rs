pub mod shaderlab;

use nom::{
	bytes::complete::*, character::complete::*, combinator::*, sequence::*, IResult,
};

pub fn identifier(input: &str) -> IResult<&str, &str> {
	recognize(pair(
		take_while_m_n(1, 1, |c: char| c == '_' || c.is_alphabetic()),
		take_while(|c: char| c == '_' || c.is_alphanumeric()),
	))(input)
}

/// Double-quoted string without escapes, yields the inner text.
pub fn quoted_string(input: &str) -> IResult<&str, &str> {
	delimited(char('"'), take_till(|c: char| c == '"'), char('"'))(input)
}

/// Parenthesized text without nesting, yields the inner text.
pub fn parenthesized(input: &str) -> IResult<&str, &str> {
	delimited(char('('), take_till(|c: char| c == ')'), char(')'))(input)
}
