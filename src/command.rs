//! Turning a line of input into something the table understands.

use tracing::debug;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::table::{Scan, Table};

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Constants,
    Unrecognized,
}

impl MetaCommand {
    /// `None` when `input` isn't a meta-command at all.
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            ".constants" => Some(MetaCommand::Constants),
            _ => {
                if input.starts_with('.') {
                    Some(MetaCommand::Unrecognized)
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// What a statement produced. Selected rows are decoded lazily.
pub enum Output<'a> {
    Inserted,
    Rows(Scan<'a>),
}

impl Statement {
    pub fn prepare(input: &str) -> Result<Statement> {
        let mut tokens = input.split_whitespace();

        match tokens.next() {
            Some("insert") => prepare_insert(input, tokens),
            Some("select") => Ok(Statement::Select),
            _ => Err(Error::UnrecognizedStatement {
                input: input.to_string(),
            }),
        }
    }

    pub fn execute<'a>(&self, table: &'a mut Table) -> Result<Output<'a>> {
        match self {
            Statement::Insert(row) => {
                table.insert(row)?;
                Ok(Output::Inserted)
            }
            Statement::Select => {
                let table: &'a Table = table;
                Ok(Output::Rows(table.scan()))
            }
        }
    }
}

fn prepare_insert<'a>(input: &str, args: impl Iterator<Item = &'a str>) -> Result<Statement> {
    let malformed = || Error::MalformedCommand {
        input: input.to_string(),
    };

    let args = args.collect::<Vec<_>>();
    let [id, username, email] = args[..] else {
        debug!(count = args.len(), "insert expects three arguments");
        return Err(malformed());
    };

    let id = match id.parse::<u32>() {
        Ok(id) => id,
        Err(_) if id.parse::<i64>().is_ok_and(|id| id < 0) => return Err(Error::NegativeId),
        Err(_) => return Err(malformed()),
    };

    Ok(Statement::Insert(Row::new(id, username, email)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::USERNAME_SIZE;
    use rstest::*;

    #[rstest]
    #[case::exit(".exit", Some(MetaCommand::Exit))]
    #[case::constants(".constants", Some(MetaCommand::Constants))]
    #[case::unknown(".tables", Some(MetaCommand::Unrecognized))]
    #[case::dot_only(".", Some(MetaCommand::Unrecognized))]
    #[case::statement("select", None)]
    fn meta_command(#[case] input: &str, #[case] expected: Option<MetaCommand>) {
        assert_eq!(MetaCommand::parse(input), expected);
    }

    #[test]
    fn insert() {
        let statement = Statement::prepare("insert 1 alice a@x.com").unwrap();
        assert_eq!(
            statement,
            Statement::Insert(Row::new(1, "alice", "a@x.com").unwrap())
        );
    }

    #[test]
    fn insert_tolerates_extra_whitespace() {
        let statement = Statement::prepare("  insert   2\tbob  b@x.com ").unwrap();
        assert_eq!(
            statement,
            Statement::Insert(Row::new(2, "bob", "b@x.com").unwrap())
        );
    }

    #[rstest]
    #[case::plain("select")]
    #[case::trailing("select *")]
    fn select(#[case] input: &str) {
        assert_eq!(Statement::prepare(input).unwrap(), Statement::Select);
    }

    #[rstest]
    #[case::no_args("insert", |e| matches!(e, Error::MalformedCommand { .. }))]
    #[case::missing_email("insert 1 alice", |e| matches!(e, Error::MalformedCommand { .. }))]
    #[case::extra_arg("insert 1 alice a@x.com more", |e| matches!(e, Error::MalformedCommand { .. }))]
    #[case::non_numeric_id("insert one alice a@x.com", |e| matches!(e, Error::MalformedCommand { .. }))]
    #[case::id_overflow("insert 4294967296 alice a@x.com", |e| matches!(e, Error::MalformedCommand { .. }))]
    #[case::negative_id("insert -1 alice a@x.com", |e| matches!(e, Error::NegativeId))]
    #[case::unknown_keyword("update 1 alice a@x.com", |e| matches!(e, Error::UnrecognizedStatement { .. }))]
    #[case::prefix_only("inserted 1 alice a@x.com", |e| matches!(e, Error::UnrecognizedStatement { .. }))]
    #[case::empty("", |e| matches!(e, Error::UnrecognizedStatement { .. }))]
    fn bad_statement(#[case] input: &str, #[case] matcher: fn(Error) -> bool) {
        let error = Statement::prepare(input).expect_err("should be error test");
        assert!(matcher(error));
    }

    #[test]
    fn malformed_echoes_input() {
        let error = Statement::prepare("insert x y").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Syntax error. Could not parse statement: insert x y"
        );
    }

    #[test]
    fn oversize_username() {
        let input = format!("insert 1 {} a@x.com", "a".repeat(USERNAME_SIZE + 1));
        let error = Statement::prepare(&input).unwrap_err();
        assert!(matches!(
            error,
            Error::OversizeField {
                field: "username",
                ..
            }
        ));
    }

    #[test]
    fn execute_insert_then_select() {
        let mut table = Table::new();
        let insert = Statement::prepare("insert 1 alice a@x.com").unwrap();
        assert!(matches!(insert.execute(&mut table), Ok(Output::Inserted)));

        let Ok(Output::Rows(rows)) = Statement::Select.execute(&mut table) else {
            panic!("select should produce rows");
        };
        let rows = rows.collect::<Vec<_>>();
        assert_eq!(rows, vec![(0, Row::new(1, "alice", "a@x.com").unwrap())]);
    }
}
