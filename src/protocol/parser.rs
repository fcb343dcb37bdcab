//! Turn-protocol parser.
//!
//! The referee sends an init block once (factory count, link count, then
//! one `u v distance` line per link) followed by one block per turn (entity
//! count, then one `id KIND a1 a2 a3 a4 a5` line per entity). Lines are
//! parsed here into typed values for the engine.

use thiserror::Error;

use crate::board::{FactoryId, Owner, Troop};

/// Errors that can occur while parsing protocol lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid integer '{0}'")]
    InvalidInteger(String),

    #[error("invalid owner {0}")]
    InvalidOwner(i32),

    #[error("unknown entity kind '{0}'")]
    UnknownEntity(String),

    #[error("factory {id} out of range (match has {count} factories)")]
    FactoryOutOfRange { id: i64, count: usize },

    #[error("negative {field}: {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),
}

/// An undirected link from the init block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub from: FactoryId,
    pub to: FactoryId,
    pub distance: u32,
}

/// One entity line of a turn block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// `id FACTORY owner cyborgs production _ _`
    Factory {
        id: FactoryId,
        owner: Owner,
        cyborgs: i32,
        production: i32,
    },

    /// `id TROOP owner from to cyborgs turns_left`
    Troop(Troop),

    /// `id BOMB owner from to turns_left _`. Enemy bombs report -1 for the
    /// unknown target and arrival time.
    Bomb {
        id: i32,
        owner: Owner,
        from: i32,
        to: i32,
        turns_left: i32,
    },
}

/// Match set-up read from the init block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInit {
    pub factory_count: usize,
    pub links: Vec<Link>,
}

fn int(token: &str) -> Result<i32, ProtocolError> {
    token
        .parse::<i32>()
        .map_err(|_| ProtocolError::InvalidInteger(token.to_string()))
}

fn non_negative(token: &str, field: &'static str) -> Result<usize, ProtocolError> {
    let value = int(token)?;
    usize::try_from(value).map_err(|_| ProtocolError::Negative {
        field,
        value: value as i64,
    })
}

fn owner(token: &str) -> Result<Owner, ProtocolError> {
    let value = int(token)?;
    Owner::from_protocol(value).ok_or(ProtocolError::InvalidOwner(value))
}

fn fields(line: &str, expected: usize) -> Result<Vec<&str>, ProtocolError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ProtocolError::EmptyInput);
    }
    if tokens.len() != expected {
        return Err(ProtocolError::FieldCount {
            expected,
            found: tokens.len(),
        });
    }
    Ok(tokens)
}

/// Parses a line holding a single count.
pub fn parse_count(line: &str) -> Result<usize, ProtocolError> {
    let tokens = fields(line, 1)?;
    non_negative(tokens[0], "count")
}

/// Parses a `u v distance` link line, checking both ids against the match size.
pub fn parse_link(line: &str, factory_count: usize) -> Result<Link, ProtocolError> {
    let tokens = fields(line, 3)?;
    let mut ids = [0usize; 2];
    for (slot, token) in ids.iter_mut().zip(&tokens[..2]) {
        let id = non_negative(token, "factory id")?;
        if id >= factory_count {
            return Err(ProtocolError::FactoryOutOfRange {
                id: id as i64,
                count: factory_count,
            });
        }
        *slot = id;
    }
    let distance = non_negative(tokens[2], "distance")? as u32;
    Ok(Link {
        from: ids[0],
        to: ids[1],
        distance,
    })
}

/// Parses one entity line of a turn block.
pub fn parse_entity(line: &str) -> Result<Entity, ProtocolError> {
    let tokens = fields(line, 7)?;
    let id = int(tokens[0])?;
    let args = &tokens[2..];

    match tokens[1] {
        "FACTORY" => Ok(Entity::Factory {
            id: non_negative(tokens[0], "factory id")?,
            owner: owner(args[0])?,
            cyborgs: int(args[1])?,
            production: int(args[2])?,
        }),
        "TROOP" => Ok(Entity::Troop(Troop {
            id,
            owner: owner(args[0])?,
            from: non_negative(args[1], "troop source")?,
            to: non_negative(args[2], "troop destination")?,
            cyborgs: int(args[3])?,
            turns_left: int(args[4])?,
        })),
        "BOMB" => Ok(Entity::Bomb {
            id,
            owner: owner(args[0])?,
            from: int(args[1])?,
            to: int(args[2])?,
            turns_left: int(args[3])?,
        }),
        other => Err(ProtocolError::UnknownEntity(other.to_string())),
    }
}

/// Reads the init block: factory count, link count, and the links.
pub fn read_init<I>(lines: &mut I) -> Result<MatchInit, ProtocolError>
where
    I: Iterator<Item = String>,
{
    let header = lines.next().ok_or(ProtocolError::UnexpectedEnd("factory count"))?;
    let factory_count = parse_count(&header)?;
    let header = lines.next().ok_or(ProtocolError::UnexpectedEnd("link count"))?;
    let link_count = parse_count(&header)?;
    let mut links = Vec::with_capacity(link_count);
    for _ in 0..link_count {
        let line = lines.next().ok_or(ProtocolError::UnexpectedEnd("link"))?;
        links.push(parse_link(&line, factory_count)?);
    }
    Ok(MatchInit {
        factory_count,
        links,
    })
}

/// Reads one turn block. Returns `Ok(None)` at end of input; individual
/// entity lines keep their own parse result so one bad line does not lose
/// the turn.
pub fn read_turn<I>(
    lines: &mut I,
) -> Result<Option<Vec<Result<Entity, ProtocolError>>>, ProtocolError>
where
    I: Iterator<Item = String>,
{
    let Some(header) = lines.next() else {
        return Ok(None);
    };
    let count = parse_count(&header)?;
    let mut entities = Vec::with_capacity(count);
    for _ in 0..count {
        let line = lines.next().ok_or(ProtocolError::UnexpectedEnd("entity"))?;
        entities.push(parse_entity(&line));
    }
    Ok(Some(entities))
}
