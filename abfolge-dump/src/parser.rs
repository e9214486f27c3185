use nom::{
    character::complete::digit1,
    Finish,
    IResult,
    combinator::{all_consuming, map, map_res, opt, value},
    sequence::{delimited, pair, preceded, terminated, tuple},
    branch::alt,
    bytes::complete::{tag, take_while},
    multi::separated_list0,
};
use anyhow::{anyhow, Result};
use crate::layout::{Layout, ScalarKind};

const WHITESPACE: &str = " \t\r\n";

fn white(i: &str) -> IResult<&str, &str> {
    take_while(move |c| WHITESPACE.contains(c))(i)
}

fn scalar(i: &str) -> IResult<&str, ScalarKind> {
    alt((
        value(ScalarKind::U128, tag("u128")),
        value(ScalarKind::U16, tag("u16")),
        value(ScalarKind::U32, tag("u32")),
        value(ScalarKind::U64, tag("u64")),
        value(ScalarKind::U8, tag("u8")),
        value(ScalarKind::Usize, tag("usize")),
        value(ScalarKind::I128, tag("i128")),
        value(ScalarKind::I16, tag("i16")),
        value(ScalarKind::I32, tag("i32")),
        value(ScalarKind::I64, tag("i64")),
        value(ScalarKind::I8, tag("i8")),
        value(ScalarKind::Isize, tag("isize")),
        value(ScalarKind::F32, tag("f32")),
        value(ScalarKind::F64, tag("f64")),
        value(ScalarKind::Bool, tag("bool")),
        value(ScalarKind::Char, tag("char")),
    ))(i)
}

fn number(i: &str) -> IResult<&str, usize> {
    map_res(digit1, |n: &str| n.parse())(i)
}

/// `[S]` or `[S; N]`
fn array(i: &str) -> IResult<&str, Layout> {
    map(
        delimited(tag("["), pair(layout, opt(preceded(tag(";"), delimited(white, number, white)))), tag("]")),
        |(elem, len)| match len {
            Some(n) => Layout::Fixed(Box::new(elem), n),
            None => Layout::Array(Box::new(elem)),
        },
    )(i)
}

/// `{S}` or `{K: V}`
fn container(i: &str) -> IResult<&str, Layout> {
    map(
        delimited(tag("{"), pair(layout, opt(preceded(tag(":"), layout))), tag("}")),
        |(key, value)| match value {
            Some(value) => Layout::Map(Box::new(key), Box::new(value)),
            None => Layout::Set(Box::new(key)),
        },
    )(i)
}

/// `(S, ..)` with an optional trailing comma
fn tuple_layout(i: &str) -> IResult<&str, Layout> {
    map(
        delimited(
            pair(tag("("), white),
            separated_list0(tag(","), layout),
            tuple((opt(tag(",")), white, tag(")"))),
        ),
        Layout::Tuple,
    )(i)
}

fn layout(i: &str) -> IResult<&str, Layout> {
    delimited(white, alt((
        map(scalar, Layout::Scalar),
        value(Layout::Str, tag("str")),
        array,
        container,
        tuple_layout,
    )), white)(i)
}

pub fn parse(i: &str) -> Result<Layout> {
    Ok(all_consuming(terminated(layout, white))(i).finish().map_err(|e| anyhow!("Invalid shape expression: {}", e))?.1)
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::layout::{Layout, ScalarKind};

    #[test]
    fn scalars() {
        assert_eq!(Layout::Scalar(ScalarKind::U16), parse("u16").unwrap());
        assert_eq!(Layout::Scalar(ScalarKind::U128), parse("u128").unwrap());
        assert_eq!(Layout::Scalar(ScalarKind::Usize), parse(" usize ").unwrap());
        assert_eq!(Layout::Str, parse("str").unwrap());
        assert!(parse("u7").is_err());
        assert!(parse("u8u8").is_err());
    }

    #[test]
    fn nested() {
        let expected = Layout::Tuple(vec![
            Layout::Scalar(ScalarKind::U32),
            Layout::Array(Box::new(Layout::Str)),
            Layout::Map(Box::new(Layout::Scalar(ScalarKind::U8)), Box::new(Layout::Fixed(Box::new(Layout::Scalar(ScalarKind::F64)), 3))),
            Layout::Set(Box::new(Layout::Scalar(ScalarKind::Char))),
        ]);
        assert_eq!(expected, parse("(u32, [str], {u8: [f64; 3]}, {char})").unwrap());
        assert_eq!(expected, parse("( u32 ,[ str ],{ u8 : [ f64 ; 3 ] },{ char }, )").unwrap());
    }

    #[test]
    fn empty_tuple() {
        assert_eq!(Layout::Tuple(vec![]), parse("()").unwrap());
        assert_eq!(Layout::Tuple(vec![]), parse("( )").unwrap());
        assert_eq!(Layout::Tuple(vec![Layout::Scalar(ScalarKind::Bool)]), parse("(bool,)").unwrap());
    }

    #[test]
    fn malformed() {
        assert!(parse("[u8").is_err());
        assert!(parse("[u8; x]").is_err());
        assert!(parse("{u8: }").is_err());
        assert!(parse("(u8,,)").is_err());
    }

}
