//! Syntax tree types handed over by the schema parser.
//!
//! Lines and columns are 1-based; `end` points one past the last character.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical category of a parsed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SyntaxNodeKind {
    Document,
    OperationDefinition,
    FragmentDefinition,
    SchemaDefinition,
    SchemaExtension,
    ObjectTypeDefinition,
    ObjectTypeExtension,
    ScalarTypeDefinition,
    ScalarTypeExtension,
    InterfaceTypeDefinition,
    InterfaceTypeExtension,
    UnionTypeDefinition,
    UnionTypeExtension,
    EnumTypeDefinition,
    EnumTypeExtension,
    InputObjectTypeDefinition,
    InputObjectTypeExtension,
    FieldDefinition,
    InputValueDefinition,
    EnumValueDefinition,
    DirectiveDefinition,
}

impl SyntaxNodeKind {
    /// Kinds that may carry a description, in catalog order.
    pub const DESCRIBABLE: &'static [SyntaxNodeKind] = &[
        SyntaxNodeKind::SchemaDefinition,
        SyntaxNodeKind::ObjectTypeDefinition,
        SyntaxNodeKind::ScalarTypeDefinition,
        SyntaxNodeKind::InterfaceTypeDefinition,
        SyntaxNodeKind::UnionTypeDefinition,
        SyntaxNodeKind::EnumTypeDefinition,
        SyntaxNodeKind::InputObjectTypeDefinition,
        SyntaxNodeKind::FieldDefinition,
        SyntaxNodeKind::InputValueDefinition,
        SyntaxNodeKind::EnumValueDefinition,
        SyntaxNodeKind::DirectiveDefinition,
    ];

    pub fn is_describable(self) -> bool {
        Self::DESCRIBABLE.contains(&self)
    }

    /// `schema { ... }` is the only describable definition without a name.
    pub fn has_name(self) -> bool {
        !matches!(
            self,
            SyntaxNodeKind::Document
                | SyntaxNodeKind::SchemaDefinition
                | SyntaxNodeKind::SchemaExtension
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SyntaxNodeKind::Document => "Document",
            SyntaxNodeKind::OperationDefinition => "OperationDefinition",
            SyntaxNodeKind::FragmentDefinition => "FragmentDefinition",
            SyntaxNodeKind::SchemaDefinition => "SchemaDefinition",
            SyntaxNodeKind::SchemaExtension => "SchemaExtension",
            SyntaxNodeKind::ObjectTypeDefinition => "ObjectTypeDefinition",
            SyntaxNodeKind::ObjectTypeExtension => "ObjectTypeExtension",
            SyntaxNodeKind::ScalarTypeDefinition => "ScalarTypeDefinition",
            SyntaxNodeKind::ScalarTypeExtension => "ScalarTypeExtension",
            SyntaxNodeKind::InterfaceTypeDefinition => "InterfaceTypeDefinition",
            SyntaxNodeKind::InterfaceTypeExtension => "InterfaceTypeExtension",
            SyntaxNodeKind::UnionTypeDefinition => "UnionTypeDefinition",
            SyntaxNodeKind::UnionTypeExtension => "UnionTypeExtension",
            SyntaxNodeKind::EnumTypeDefinition => "EnumTypeDefinition",
            SyntaxNodeKind::EnumTypeExtension => "EnumTypeExtension",
            SyntaxNodeKind::InputObjectTypeDefinition => "InputObjectTypeDefinition",
            SyntaxNodeKind::InputObjectTypeExtension => "InputObjectTypeExtension",
            SyntaxNodeKind::FieldDefinition => "FieldDefinition",
            SyntaxNodeKind::InputValueDefinition => "InputValueDefinition",
            SyntaxNodeKind::EnumValueDefinition => "EnumValueDefinition",
            SyntaxNodeKind::DirectiveDefinition => "DirectiveDefinition",
        }
    }
}

impl fmt::Display for SyntaxNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// A string token together with its own source span.
///
/// `text` is absent when the parser kept the token's span but not its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLiteral {
    #[serde(default, alias = "value", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub loc: Location,
}

impl TextLiteral {
    pub fn new(text: impl Into<String>, loc: Location) -> Self {
        Self {
            text: Some(text.into()),
            loc,
        }
    }

    /// A literal that carries a span and no text.
    pub fn empty(loc: Location) -> Self {
        Self { text: None, loc }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Names share the literal shape.
pub type Identifier = TextLiteral;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: SyntaxNodeKind,
    #[serde(default)]
    pub loc: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextLiteral>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxNodeKind, loc: Location) -> Self {
        Self {
            kind,
            loc,
            name: None,
            description: None,
            children: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: Identifier) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_description(mut self, description: TextLiteral) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }
}
