//! Integration tests for error reporting and the parameterized facade
//!
//! These tests pin down the precision of failure reports: positions,
//! caller-defined problems, context stacks, and the committed-choice
//! behavior of the numeric recognizer.

use pinpoint::advanced::{self, DeadEnd, Located, NumberConfig, Position, Token};

#[derive(Clone, Debug, PartialEq)]
enum Problem {
    ExpectingInt,
    ExpectingLet,
    ExpectingEquals,
    ExpectingName,
    ExpectingOpenBracket,
    ExpectingCloseBracket,
    ExpectingCloseComment,
    ExpectingNumber,
    InvalidNumber,
    NoOctal,
    NoBinary,
    NoFloat,
}

#[derive(Clone, Debug, PartialEq)]
enum Context {
    Definition,
    List,
}

type Parser<T> = advanced::Parser<Context, Problem, T>;

fn dead_end(row: usize, column: usize, problem: Problem) -> DeadEnd<Context, Problem> {
    DeadEnd {
        row,
        column,
        problem,
        context_stack: Vec::new(),
    }
}

// ============================================================================
// Custom Problems
// ============================================================================

#[test]
fn test_integer_with_custom_problems() {
    let parser: Parser<i64> = advanced::integer(Problem::ExpectingInt, Problem::InvalidNumber);
    assert_eq!(advanced::run(&parser, "123456"), Ok(123456));
    assert_eq!(
        advanced::run(&parser, "3.1415"),
        Err(vec![dead_end(1, 1, Problem::InvalidNumber)])
    );
    assert_eq!(
        advanced::run(&parser, "horse"),
        Err(vec![dead_end(1, 1, Problem::ExpectingInt)])
    );
}

#[test]
fn test_keyword_with_custom_problem() {
    let parser: Parser<()> = advanced::keyword(Token::new("let", Problem::ExpectingLet));
    assert_eq!(
        advanced::run(&parser, "letter"),
        Err(vec![dead_end(1, 1, Problem::ExpectingLet)])
    );
}

#[test]
fn test_number_with_result_slots() {
    let parser: Parser<i64> = advanced::number(NumberConfig {
        int: Ok(Box::new(|n| n)),
        hexadecimal: Ok(Box::new(|n| n)),
        octal: Err(Problem::NoOctal),
        binary: Err(Problem::NoBinary),
        float: Err(Problem::NoFloat),
        invalid: Problem::InvalidNumber,
        expecting: Problem::ExpectingNumber,
    });

    assert_eq!(advanced::run(&parser, "0xFF"), Ok(255));
    assert_eq!(advanced::run(&parser, "1776"), Ok(1776));
    assert_eq!(
        advanced::run(&parser, "0o17"),
        Err(vec![dead_end(1, 1, Problem::NoOctal)])
    );
    assert_eq!(
        advanced::run(&parser, "0b1"),
        Err(vec![dead_end(1, 1, Problem::NoBinary)])
    );
    assert_eq!(
        advanced::run(&parser, "1.5"),
        Err(vec![dead_end(1, 1, Problem::NoFloat)])
    );
}

#[test]
fn test_forbidden_base_commits_the_choice() {
    let number: Parser<i64> = advanced::integer(Problem::ExpectingInt, Problem::InvalidNumber);
    let fallback: Parser<i64> =
        advanced::map(|_| -1, advanced::keyword(Token::new("x", Problem::ExpectingName)));
    let parser = advanced::one_of(vec![number, fallback]);

    // The recognizer saw "0b" and committed; the fallback is never tried.
    assert_eq!(
        advanced::run(&parser, "0b101"),
        Err(vec![dead_end(1, 1, Problem::InvalidNumber)])
    );
}

#[test]
fn test_float_with_custom_problems() {
    let parser: Parser<f64> = advanced::float(Problem::ExpectingNumber, Problem::InvalidNumber);
    assert_eq!(advanced::run(&parser, "6.022e23"), Ok(6.022e23));
    assert_eq!(
        advanced::run(&parser, "1e"),
        Err(vec![dead_end(1, 3, Problem::InvalidNumber)])
    );
}

// ============================================================================
// Context Stacks
// ============================================================================

#[test]
fn test_failure_carries_context_frame() {
    let list: Parser<()> = advanced::in_context(
        Context::List,
        advanced::skip(
            advanced::token(Token::new("[", Problem::ExpectingOpenBracket)),
            advanced::token(Token::new("]", Problem::ExpectingCloseBracket)),
        ),
    );

    assert_eq!(
        advanced::run(&list, "[x"),
        Err(vec![DeadEnd {
            row: 1,
            column: 2,
            problem: Problem::ExpectingCloseBracket,
            context_stack: vec![Located {
                row: 1,
                column: 1,
                context: Context::List,
            }],
        }])
    );
}

#[test]
fn test_nested_contexts_innermost_last() {
    let inner: Parser<()> = advanced::in_context(
        Context::List,
        advanced::token(Token::new("]", Problem::ExpectingCloseBracket)),
    );
    let outer = advanced::in_context(
        Context::Definition,
        advanced::skip(
            advanced::keyword(Token::new("let", Problem::ExpectingLet)),
            advanced::map2(|_, inner| inner, advanced::spaces(), inner),
        ),
    );

    assert_eq!(
        advanced::run(&outer, "let x"),
        Err(vec![DeadEnd {
            row: 1,
            column: 5,
            problem: Problem::ExpectingCloseBracket,
            context_stack: vec![
                Located {
                    row: 1,
                    column: 1,
                    context: Context::Definition,
                },
                Located {
                    row: 1,
                    column: 5,
                    context: Context::List,
                },
            ],
        }])
    );
}

#[test]
fn test_success_restores_surrounding_context() {
    let inner: Parser<()> = advanced::in_context(
        Context::List,
        advanced::token(Token::new("[]", Problem::ExpectingOpenBracket)),
    );
    // After the context closes, a failure reports an empty stack again.
    let parser = advanced::skip(
        inner,
        advanced::token(Token::new("=", Problem::ExpectingEquals)),
    );

    assert_eq!(
        advanced::run(&parser, "[]x"),
        Err(vec![dead_end(1, 3, Problem::ExpectingEquals)])
    );
}

#[test]
fn test_chomp_until_reports_context_at_eof() {
    let parser: Parser<()> = advanced::in_context(
        Context::List,
        advanced::chomp_until(Token::new("]", Problem::ExpectingCloseComment)),
    );
    assert_eq!(
        advanced::run(&parser, "a\nbc"),
        Err(vec![DeadEnd {
            row: 2,
            column: 3,
            problem: Problem::ExpectingCloseComment,
            context_stack: vec![Located {
                row: 1,
                column: 1,
                context: Context::List,
            }],
        }])
    );
}

// ============================================================================
// Position Observers
// ============================================================================

#[test]
fn test_observers_do_not_consume() {
    let position: Parser<Position> = advanced::get_position();
    let row: Parser<usize> = advanced::get_row();
    let column: Parser<usize> = advanced::get_column();
    let offset: Parser<usize> = advanced::get_offset();
    let indent: Parser<usize> = advanced::get_indent();

    assert_eq!(
        advanced::run(&position, "anything"),
        Ok(Position { row: 1, column: 1 })
    );
    assert_eq!(advanced::run(&row, "anything"), Ok(1));
    assert_eq!(advanced::run(&column, "anything"), Ok(1));
    assert_eq!(advanced::run(&offset, "anything"), Ok(0));
    assert_eq!(advanced::run(&indent, "anything"), Ok(1));
}

#[test]
fn test_get_source_returns_whole_input() {
    let parser: Parser<String> = advanced::get_source();
    assert_eq!(advanced::run(&parser, "abc"), Ok("abc".to_string()));
}

#[test]
fn test_position_after_multiline_chomp() {
    let parser: Parser<Position> = advanced::map2(
        |_, position| position,
        advanced::chomp_while(|c| c != '!'),
        advanced::get_position(),
    );
    assert_eq!(
        advanced::run(&parser, "one\ntwo\nthree!"),
        Ok(Position { row: 3, column: 6 })
    );
}

// ============================================================================
// Indentation
// ============================================================================

#[test]
fn test_with_indent_sets_and_restores() {
    let parser: Parser<(usize, usize)> = advanced::map2(
        |inner, outer| (inner, outer),
        advanced::with_indent(4, advanced::get_indent()),
        advanced::get_indent(),
    );
    assert_eq!(advanced::run(&parser, ""), Ok((4, 1)));
}

#[test]
fn test_indent_survives_consumption() {
    let parser: Parser<usize> = advanced::with_indent(
        3,
        advanced::map2(
            |_, indent| indent,
            advanced::token(Token::new("ab", Problem::ExpectingName)),
            advanced::get_indent(),
        ),
    );
    assert_eq!(advanced::run(&parser, "abc"), Ok(3));
}

// ============================================================================
// Capture
// ============================================================================

#[test]
fn test_map_chomped_string_sees_slice_and_value() {
    let parser: Parser<(String, i64)> = advanced::map_chomped_string(
        |chomped, value| (chomped.to_string(), value),
        advanced::integer(Problem::ExpectingInt, Problem::InvalidNumber),
    );
    assert_eq!(
        advanced::run(&parser, "1776 and all that"),
        Ok(("1776".to_string(), 1776))
    );
}

#[test]
fn test_map_chomped_string_passes_failure_through() {
    let parser: Parser<(String, i64)> = advanced::map_chomped_string(
        |chomped, value| (chomped.to_string(), value),
        advanced::integer(Problem::ExpectingInt, Problem::InvalidNumber),
    );
    assert_eq!(
        advanced::run(&parser, "nope"),
        Err(vec![dead_end(1, 1, Problem::ExpectingInt)])
    );
}

// ============================================================================
// Dead End Ordering
// ============================================================================

#[test]
fn test_dead_ends_flatten_in_recording_order() {
    let parser: Parser<()> = advanced::one_of(vec![
        advanced::token(Token::new("one", Problem::ExpectingName)),
        advanced::token(Token::new("two", Problem::ExpectingEquals)),
        advanced::token(Token::new("three", Problem::ExpectingLet)),
    ]);

    let problems: Vec<Problem> = advanced::run(&parser, "zzz")
        .unwrap_err()
        .into_iter()
        .map(|dead_end| dead_end.problem)
        .collect();
    assert_eq!(
        problems,
        vec![
            Problem::ExpectingName,
            Problem::ExpectingEquals,
            Problem::ExpectingLet,
        ]
    );
}
