// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Semantic symbols
//!
//! Symbols reference each other freely (a type lists its members, every
//! member names its owner), so they live in a [`SymbolTable`] arena and refer
//! to one another by [`SymbolId`]. A [`SymbolRef`] pairs a table with an id
//! and is the value handed out to consumers.

use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use parking_lot::RwLock;

use crate::{Error, Result, syntax::SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub usize);

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
	Class,
	Object,
	Interface,
	Field,
	Local,
	Parameter,
	Function,
	TypeParameter,
}

impl SymbolKind {
	pub fn ordinal(self) -> i32 {
		self as i32
	}

	pub fn is_type(self) -> bool {
		matches!(self, SymbolKind::Class | SymbolKind::Object | SymbolKind::Interface)
	}

	pub fn is_variable(self) -> bool {
		matches!(self, SymbolKind::Field | SymbolKind::Local | SymbolKind::Parameter)
	}
}

/// Instantiates a generic type definition with concrete type arguments
pub trait TypeConstructor: Send + Sync {
	fn construct(&self, definition: &SymbolRef, type_arguments: &[SymbolRef]) -> Result<SymbolRef>;
}

#[derive(Clone, Default)]
pub struct TypeDetail {
	pub is_abstract: bool,
	pub base_types: Vec<SymbolId>,
	pub type_arguments: Vec<SymbolId>,
	pub original_definition: Option<SymbolId>,
	pub members: Vec<SymbolId>,
	pub constructor: Option<Arc<dyn TypeConstructor>>,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionDetail {
	pub is_native: bool,
	pub is_virtual: bool,
	pub is_abstract: bool,
	pub is_override: bool,
	pub parameters: Vec<SymbolId>,
	pub return_type: Option<SymbolId>,
	pub locals: Vec<SymbolId>,
}

#[derive(Debug, Clone, Default)]
pub struct VariableDetail {
	pub ty: Option<SymbolId>,
}

#[derive(Debug, Clone, Default)]
pub struct TypeParameterDetail {
	pub bounds: Vec<SymbolId>,
}

#[derive(Clone)]
pub enum SymbolDetail {
	Type(TypeDetail),
	Function(FunctionDetail),
	Variable(VariableDetail),
	TypeParameter(TypeParameterDetail),
}

impl SymbolDetail {
	fn accepts(&self, kind: SymbolKind) -> bool {
		match self {
			SymbolDetail::Type(_) => kind.is_type(),
			SymbolDetail::Function(_) => kind == SymbolKind::Function,
			SymbolDetail::Variable(_) => kind.is_variable(),
			SymbolDetail::TypeParameter(_) => kind == SymbolKind::TypeParameter,
		}
	}
}

#[derive(Clone)]
pub struct Symbol {
	pub kind: SymbolKind,
	pub name: String,
	pub definition: Option<Arc<dyn SyntaxNode>>,
	/// Absent for types, which are top-level
	pub owner: Option<SymbolId>,
	pub detail: SymbolDetail,
}

impl Symbol {
	pub fn new(kind: SymbolKind, name: impl Into<String>, detail: SymbolDetail) -> Self {
		Self {
			kind,
			name: name.into(),
			definition: None,
			owner: None,
			detail,
		}
	}

	pub fn with_owner(mut self, owner: SymbolId) -> Self {
		self.owner = Some(owner);
		self
	}

	pub fn with_definition(mut self, definition: Arc<dyn SyntaxNode>) -> Self {
		self.definition = Some(definition);
		self
	}
}

impl Debug for Symbol {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Symbol")
			.field("kind", &self.kind)
			.field("name", &self.name)
			.field("owner", &self.owner)
			.finish_non_exhaustive()
	}
}

#[derive(Default)]
pub struct SymbolTable {
	symbols: RwLock<Vec<Arc<Symbol>>>,
}

impl SymbolTable {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn insert(self: &Arc<Self>, symbol: Symbol) -> Result<SymbolRef> {
		if !symbol.detail.accepts(symbol.kind) {
			return Err(Error::SymbolShapeMismatch(symbol.name));
		}
		let mut symbols = self.symbols.write();
		let id = SymbolId(symbols.len());
		symbols.push(Arc::new(symbol));
		Ok(SymbolRef {
			table: self.clone(),
			id,
		})
	}

	/// Apply `f` to a symbol in place, used to close reference cycles after insertion
	pub fn update(&self, id: SymbolId, f: impl FnOnce(&mut Symbol)) -> Result<()> {
		let mut symbols = self.symbols.write();
		let slot = symbols.get_mut(id.0).ok_or(Error::UnknownSymbol(id.0))?;
		let symbol = Arc::make_mut(slot);
		f(symbol);
		if !symbol.detail.accepts(symbol.kind) {
			return Err(Error::SymbolShapeMismatch(symbol.name.clone()));
		}
		Ok(())
	}

	pub fn symbol(&self, id: SymbolId) -> Result<Arc<Symbol>> {
		self.symbols.read().get(id.0).cloned().ok_or(Error::UnknownSymbol(id.0))
	}

	pub fn get(self: &Arc<Self>, id: SymbolId) -> Result<SymbolRef> {
		if id.0 >= self.len() {
			return Err(Error::UnknownSymbol(id.0));
		}
		Ok(SymbolRef {
			table: self.clone(),
			id,
		})
	}

	pub fn len(&self) -> usize {
		self.symbols.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Symbol addressed through its table
#[derive(Clone)]
pub struct SymbolRef {
	table: Arc<SymbolTable>,
	id: SymbolId,
}

impl SymbolRef {
	pub fn id(&self) -> SymbolId {
		self.id
	}

	pub fn table(&self) -> &Arc<SymbolTable> {
		&self.table
	}

	/// Stable identity: the table address paired with the symbol index
	pub fn identity(&self) -> (usize, usize) {
		(Arc::as_ptr(&self.table) as usize, self.id.0)
	}

	pub fn data(&self) -> Result<Arc<Symbol>> {
		self.table.symbol(self.id)
	}

	pub fn kind(&self) -> Result<SymbolKind> {
		Ok(self.data()?.kind)
	}

	pub fn name(&self) -> Result<String> {
		Ok(self.data()?.name.clone())
	}

	/// Another symbol of the same table
	pub fn sibling(&self, id: SymbolId) -> Result<SymbolRef> {
		self.table.get(id)
	}

	pub fn siblings(&self, ids: &[SymbolId]) -> Result<Vec<SymbolRef>> {
		ids.iter().map(|id| self.sibling(*id)).collect()
	}

	pub fn owner(&self) -> Result<Option<SymbolRef>> {
		self.data()?.owner.map(|id| self.sibling(id)).transpose()
	}

	pub fn construct(&self, type_arguments: &[SymbolRef]) -> Result<SymbolRef> {
		let data = self.data()?;
		let SymbolDetail::Type(detail) = &data.detail else {
			return Err(Error::NotAType(data.name.clone()));
		};
		let constructor = detail.constructor.clone().ok_or_else(|| Error::NotConstructible(data.name.clone()))?;
		constructor.construct(self, type_arguments)
	}
}

impl PartialEq for SymbolRef {
	fn eq(&self, other: &Self) -> bool {
		self.identity() == other.identity()
	}
}

impl Eq for SymbolRef {}

impl Debug for SymbolRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.data() {
			Ok(symbol) => write!(f, "SymbolRef({:?} {} #{})", symbol.kind, symbol.name, self.id.0),
			Err(_) => write!(f, "SymbolRef(#{})", self.id.0),
		}
	}
}
