//! Loader for the IDE's JSON project format.
//!
//! The raw structs mirror the file layout field for field and are only used as an
//! intermediate step before conversion into the canonical [`Item`] tree.

use super::conversion::IntoProject;
use super::definition::{
    Block, BlockContent, BlockKind, Call, Connection, Item, ItemKind, Side, Statement,
    StatementKind,
};
use crate::error::{ProjectConversionError, ProjectLoadError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    #[serde(default)]
    comments: Option<String>,
    item: ItemKind,
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    children: Vec<RawItem>,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    #[serde(default, alias = "returnType")]
    returntype: Option<String>,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    blockid: Uuid,
    blocktype: BlockKind,
    #[serde(default)]
    blockconnections: BTreeMap<Side, BTreeMap<Uuid, Side>>,
    #[serde(default)]
    blockcontent: Option<RawBlockContent>,
}

#[derive(Debug, Deserialize)]
struct RawBlockContent {
    #[serde(default)]
    statement: Option<RawStatement>,
    #[serde(default)]
    variable: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStatement {
    #[serde(rename = "type")]
    kind: StatementKind,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    parameter: Vec<RawStatement>,
    #[serde(default)]
    calls: Vec<RawCall>,
}

#[derive(Debug, Deserialize)]
struct RawCall {
    #[serde(default, rename = "type")]
    target: Option<String>,
    #[serde(default)]
    parameter: Vec<RawStatement>,
}

/// A project file as written by the IDE.
#[derive(Debug)]
pub struct ProjectFile {
    root: RawItem,
}

impl ProjectFile {
    pub fn from_json(json: &str) -> Result<Self, ProjectLoadError> {
        let root: RawItem = serde_json::from_str(json)
            .map_err(|e| ProjectLoadError::JsonParseError(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProjectLoadError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ProjectLoadError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), bytes = json.len(), "read project file");
        Self::from_json(&json)
    }

    /// Name of the root item as stored in the file.
    pub fn name(&self) -> &str {
        &self.root.name
    }
}

impl IntoProject for ProjectFile {
    fn into_project(self) -> Result<Item, ProjectConversionError> {
        convert_item(self.root)
    }
}

fn convert_item(raw: RawItem) -> Result<Item, ProjectConversionError> {
    if !raw.blocks.is_empty() && raw.item != ItemKind::Function {
        return Err(ProjectConversionError::ValidationError(format!(
            "{} '{}' owns blocks, only functions can",
            raw.item, raw.name
        )));
    }

    let children = raw
        .children
        .into_iter()
        .map(convert_item)
        .collect::<Result<Vec<_>, _>>()?;
    let blocks = raw
        .blocks
        .into_iter()
        .map(convert_block)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Item {
        name: raw.name,
        kind: raw.item,
        id: raw.id,
        comments: raw.comments.unwrap_or_default(),
        children,
        type_name: raw.type_name,
        return_type: raw.returntype,
        blocks,
    })
}

fn convert_block(raw: RawBlock) -> Result<Block, ProjectConversionError> {
    let connections = raw
        .blockconnections
        .into_iter()
        .map(|(side, targets)| {
            let targets = targets
                .into_iter()
                .map(|(target, target_side)| Connection {
                    target,
                    target_side,
                })
                .collect();
            (side, targets)
        })
        .collect();

    let content = match raw.blockcontent {
        Some(content) => Some(BlockContent {
            statement: content.statement.map(convert_statement).transpose()?,
            variable: content.variable,
        }),
        None => None,
    };

    Ok(Block {
        id: raw.blockid,
        kind: raw.blocktype,
        content,
        connections,
    })
}

fn convert_statement(raw: RawStatement) -> Result<Statement, ProjectConversionError> {
    let operands = raw
        .parameter
        .into_iter()
        .map(convert_statement)
        .collect::<Result<Vec<_>, _>>()?;
    let calls = raw
        .calls
        .into_iter()
        .map(|call| {
            let target = call.target.ok_or_else(|| {
                ProjectConversionError::ValidationError(
                    "call step without a target name".to_string(),
                )
            })?;
            let arguments = call
                .parameter
                .into_iter()
                .map(convert_statement)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Call { target, arguments })
        })
        .collect::<Result<Vec<_>, ProjectConversionError>>()?;

    Ok(Statement {
        kind: raw.kind,
        value: raw.value.filter(|v| !v.is_null()),
        operands,
        calls,
    })
}
