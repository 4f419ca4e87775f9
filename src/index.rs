//! Name and block lookup tables built once per compile pass.

use crate::error::CompileError;
use crate::project::{Block, Item, ItemKind};
use ahash::AHashMap;
use tracing::debug;
use uuid::Uuid;

/// Joins a parent's full name and a child name with a dot.
pub fn join_name(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// An item together with the context it was declared in.
#[derive(Debug, Clone)]
pub struct IndexedItem<'a> {
    pub item: &'a Item,
    pub full_name: String,
    pub parent_kind: Option<ItemKind>,
}

impl IndexedItem<'_> {
    /// Variables and functions declared directly in a package (or the project
    /// root) live in their own class as static members.
    pub fn is_static(&self) -> bool {
        matches!(
            self.parent_kind,
            Some(ItemKind::Package | ItemKind::Project)
        ) && matches!(self.item.kind, ItemKind::Variable | ItemKind::Function)
    }

    pub fn kind(&self) -> ItemKind {
        self.item.kind
    }
}

/// A block together with the full name of the function that owns it.
#[derive(Debug, Clone)]
pub struct IndexedBlock<'a> {
    pub block: &'a Block,
    pub function: String,
}

/// Read-only lookup from full names to items and from ids to blocks.
#[derive(Debug)]
pub struct ResolutionIndex<'a> {
    items: AHashMap<String, IndexedItem<'a>>,
    blocks: AHashMap<Uuid, IndexedBlock<'a>>,
}

impl<'a> ResolutionIndex<'a> {
    pub fn build(root: &'a Item) -> Result<Self, CompileError> {
        let mut index = Self {
            items: AHashMap::new(),
            blocks: AHashMap::new(),
        };
        index.visit(root, "", None)?;
        debug!(
            items = index.items.len(),
            blocks = index.blocks.len(),
            "built resolution index"
        );
        Ok(index)
    }

    fn visit(
        &mut self,
        item: &'a Item,
        parent_name: &str,
        parent_kind: Option<ItemKind>,
    ) -> Result<(), CompileError> {
        let full_name = join_name(parent_name, &item.name);
        if self.items.contains_key(&full_name) {
            return Err(CompileError::DuplicateName { name: full_name });
        }

        for block in &item.blocks {
            if self.blocks.contains_key(&block.id) {
                return Err(CompileError::DuplicateBlock(block.id));
            }
            self.blocks.insert(
                block.id,
                IndexedBlock {
                    block,
                    function: full_name.clone(),
                },
            );
        }

        self.items.insert(
            full_name.clone(),
            IndexedItem {
                item,
                full_name: full_name.clone(),
                parent_kind,
            },
        );

        for child in &item.children {
            self.visit(child, &full_name, Some(item.kind))?;
        }
        Ok(())
    }

    pub fn item(&self, name: &str) -> Option<&IndexedItem<'a>> {
        self.items.get(name)
    }

    /// Like [`item`](Self::item), but a missing name is an `UnresolvedName` error.
    pub fn resolve(&self, name: &str) -> Result<&IndexedItem<'a>, CompileError> {
        self.items
            .get(name)
            .ok_or_else(|| CompileError::UnresolvedName {
                name: name.to_string(),
            })
    }

    pub fn block(&self, id: &Uuid) -> Option<&IndexedBlock<'a>> {
        self.blocks.get(id)
    }

    pub fn is_static(&self, name: &str) -> bool {
        self.items.get(name).is_some_and(IndexedItem::is_static)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
