//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! Lexical regions and the stack used to walk them while parsing.
//!
//! Scopes and symbols live in a single arena, the [ScopeTree], and refer to one
//! another through their ids. A scope's `outer` link forms the tree used for
//! name resolution. Its `public` list names subscopes whose entries are directly
//! visible from it, such as enumeration literals and physical units.

use super::ast::NodeRef;
use super::symbol::{Symbol, SymbolId, SymbolTable};
use crate::lexer::Span;
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scope#{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Scope {
    name: Option<SymbolId>,
    table: SymbolTable,
    outer: Option<ScopeId>,
    public: Vec<ScopeId>,
    owner: Option<NodeRef>,
}

impl Scope {
    fn new(name: Option<SymbolId>, outer: Option<ScopeId>) -> Self {
        Self {
            name: name,
            table: SymbolTable::new(),
            outer: outer,
            public: Vec::new(),
            owner: None,
        }
    }

    /// The symbol naming the construct that opened this scope.
    pub fn get_name(&self) -> Option<SymbolId> {
        self.name
    }

    pub fn get_table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn get_outer(&self) -> Option<ScopeId> {
        self.outer
    }

    pub fn get_public(&self) -> &Vec<ScopeId> {
        &self.public
    }

    pub fn get_owner(&self) -> Option<NodeRef> {
        self.owner
    }

    pub fn set_outer(&mut self, outer: ScopeId) {
        self.outer = Some(outer);
    }
}

/// Arena of every scope and symbol created for one design file.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            symbols: Vec::new(),
        }
    }

    /// Creates a new scope whose enclosing scope is `outer`.
    pub fn alloc_scope(&mut self, name: Option<SymbolId>, outer: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(name, outer));
        id
    }

    /// Returns the first scope allocated, which encloses every other scope.
    pub fn root(&self) -> Option<ScopeId> {
        match self.scopes.is_empty() {
            true => None,
            false => Some(ScopeId(0)),
        }
    }

    /// Creates a symbol that belongs to no table.
    pub fn alloc_symbol(&mut self, sym: Symbol) -> SymbolId {
        let id = SymbolId::new(self.symbols.len());
        self.symbols.push(sym);
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    /// Accesses the text of a symbol.
    pub fn name_of(&self, id: SymbolId) -> &str {
        self.symbol(id).get_name()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Declares a new symbol `name` in `scope`.
    ///
    /// When the name already exists in the scope's own table the table is left
    /// untouched and the existing symbol is returned as the error.
    pub fn add(
        &mut self,
        scope: ScopeId,
        name: &str,
        span: Option<Span>,
    ) -> Result<SymbolId, SymbolId> {
        if let Some(existing) = self.find(scope, name) {
            return Err(existing);
        }
        let mut sym = Symbol::new(name);
        if let Some(span) = span {
            sym.set_span(span);
        }
        let id = self.alloc_symbol(sym);
        match self.scopes[scope.0].table.add(name, id) {
            Ok(()) => Ok(id),
            Err(existing) => Err(existing),
        }
    }

    /// Looks up `name` in `scope`'s own table.
    pub fn find(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes[scope.0].table.find(name)
    }

    /// Finds `name` in `scope`, creating an unplaced symbol when it is absent.
    pub fn get(&mut self, scope: ScopeId, name: &str) -> SymbolId {
        match self.add(scope, name, None) {
            Ok(id) => id,
            Err(id) => id,
        }
    }

    /// Resolves `name` as seen from `scope`.
    ///
    /// Collects the local entry, then the entry of every public subscope (their
    /// own tables only, in registration order), then the full search of the
    /// outer scope. The nearest match comes first.
    ///
    /// A symbol reachable along more than one path (such as from inside a public
    /// subscope) is listed once, at its nearest position.
    pub fn search(&self, scope: ScopeId, name: &str) -> Vec<SymbolId> {
        let mut found: Vec<SymbolId> = Vec::new();
        let mut next = Some(scope);
        while let Some(id) = next {
            let s = &self.scopes[id.0];
            let visible = s
                .table
                .find(name)
                .into_iter()
                .chain(s.public.iter().filter_map(|sub| self.find(*sub, name)));
            for sym in visible {
                if found.contains(&sym) == false {
                    found.push(sym);
                }
            }
            next = s.outer;
        }
        found
    }

    /// Exposes the entries of `sub` directly within `scope`.
    pub fn add_public_subscope(&mut self, scope: ScopeId, sub: ScopeId) {
        self.scopes[scope.0].public.push(sub);
    }

    pub fn set_name(&mut self, scope: ScopeId, name: SymbolId) {
        self.scopes[scope.0].name = Some(name);
    }

    /// Records the AST node that owns `scope`.
    pub fn set_owner(&mut self, scope: ScopeId, node: NodeRef) {
        self.scopes[scope.0].owner = Some(node);
    }

    pub fn set_outer(&mut self, scope: ScopeId, outer: ScopeId) {
        self.scopes[scope.0].set_outer(outer);
    }

    /// Iterates over every scope with its id.
    pub fn iter_scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes.iter().enumerate().map(|(i, s)| (ScopeId(i), s))
    }
}

/// The number of pushes and pops performed by a [ScopeStack], and how many
/// scopes were still open above the root when it was measured.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct ScopeBalance {
    pub pushes: usize,
    pub pops: usize,
    pub depth: usize,
}

impl ScopeBalance {
    /// Checks that every push was matched by a pop and the root is current.
    pub fn is_balanced(&self) -> bool {
        self.pushes == self.pops && self.depth == 0
    }
}

/// Tracks the current scope while the parser descends through regions.
///
/// Pushing remembers the scope being left so that popping always returns to it,
/// even when the pushed scope's `outer` link points elsewhere.
#[derive(Debug, PartialEq, Clone)]
pub struct ScopeStack {
    current: ScopeId,
    saved: Vec<ScopeId>,
    pushes: usize,
    pops: usize,
}

impl ScopeStack {
    pub fn new(root: ScopeId) -> Self {
        Self {
            current: root,
            saved: Vec::new(),
            pushes: 0,
            pops: 0,
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Enters `scope`.
    pub fn push(&mut self, scope: ScopeId) {
        tracing::debug!(from = %self.current, to = %scope, depth = self.saved.len() + 1, "push scope");
        self.saved.push(self.current);
        self.current = scope;
        self.pushes += 1;
    }

    /// Leaves the current scope and returns to the one active before it.
    ///
    /// Panics when attempting to leave the root scope.
    pub fn pop(&mut self) -> ScopeId {
        let left = self.current;
        match self.saved.pop() {
            Some(prev) => {
                self.current = prev;
                self.pops += 1;
                tracing::debug!(from = %left, to = %prev, depth = self.saved.len(), "pop scope");
                left
            }
            None => panic!("scope balance violation: cannot pop the root scope {}", left),
        }
    }

    /// Pops scopes until only `depth` saved entries remain.
    pub fn unwind(&mut self, depth: usize) {
        while self.saved.len() > depth {
            self.pop();
        }
    }

    /// The number of scopes entered above the root.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn balance(&self) -> ScopeBalance {
        ScopeBalance {
            pushes: self.pushes,
            pops: self.pops,
            depth: self.saved.len(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::Position;

    fn tree_with_root() -> (ScopeTree, ScopeId) {
        let mut tree = ScopeTree::new();
        let root = tree.alloc_scope(None, None);
        (tree, root)
    }

    #[test]
    fn add_never_overwrites() {
        let (mut tree, root) = tree_with_root();
        let a = tree.add(root, "Data", Some(Span::new(Position::place(1, 5)))).unwrap();
        assert_eq!(tree.add(root, "DATA", None), Err(a));
        assert_eq!(tree.name_of(a), "Data");
        assert_eq!(tree.scope(root).get_table().len(), 1);
    }

    #[test]
    fn first_scope_is_root() {
        let mut tree = ScopeTree::new();
        assert_eq!(tree.root(), None);
        let root = tree.alloc_scope(None, None);
        let inner = tree.alloc_scope(None, Some(root));
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.scope(inner).get_outer(), Some(root));
    }

    #[test]
    fn get_creates_once() {
        let (mut tree, root) = tree_with_root();
        let a = tree.get(root, "ieee");
        let b = tree.get(root, "IEEE");
        assert_eq!(a, b);
        assert_eq!(tree.symbol(a).get_span(), None);
    }

    #[test]
    fn inner_declaration_shadows_outer() {
        let (mut tree, root) = tree_with_root();
        let outer = tree.add(root, "width", None).unwrap();
        let inner_scope = tree.alloc_scope(None, Some(root));
        assert_eq!(tree.search(inner_scope, "WIDTH"), vec![outer]);
        let inner = tree.add(inner_scope, "width", None).unwrap();
        assert_eq!(tree.search(inner_scope, "width"), vec![inner, outer]);
        assert_eq!(tree.search(root, "width"), vec![outer]);
    }

    #[test]
    fn public_subscopes_are_visible() {
        let (mut tree, root) = tree_with_root();
        let pkg = tree.alloc_scope(None, Some(root));
        let color = tree.alloc_scope(None, Some(pkg));
        let red = tree.add(color, "red", None).unwrap();
        tree.add_public_subscope(pkg, color);
        let body = tree.alloc_scope(None, Some(pkg));
        assert_eq!(tree.search(body, "RED"), vec![red]);
        assert_eq!(tree.search(root, "red"), vec![]);
    }

    #[test]
    fn private_subscopes_are_hidden() {
        let (mut tree, root) = tree_with_root();
        let pkg = tree.alloc_scope(None, Some(root));
        let rec = tree.alloc_scope(None, Some(pkg));
        tree.add(rec, "field", None).unwrap();
        assert_eq!(tree.search(pkg, "field"), vec![]);
    }

    #[test]
    fn search_from_inside_public_subscope() {
        let (mut tree, root) = tree_with_root();
        let pkg = tree.alloc_scope(None, Some(root));
        let units = tree.alloc_scope(None, Some(pkg));
        tree.add_public_subscope(pkg, units);
        let fs = tree.add(units, "fs", None).unwrap();
        // seen locally and again through the package's public list
        assert_eq!(tree.search(units, "FS"), vec![fs]);
        assert_eq!(tree.search(pkg, "fs"), vec![fs]);
        // an outer declaration of the same name follows the nearer one
        let outer = tree.add(root, "fs", None).unwrap();
        assert_eq!(tree.search(units, "fs"), vec![fs, outer]);
    }

    #[test]
    fn overlapping_public_subscopes_are_ambiguous() {
        let (mut tree, root) = tree_with_root();
        let a = tree.alloc_scope(None, Some(root));
        let b = tree.alloc_scope(None, Some(root));
        let first = tree.add(a, "'0'", None).unwrap();
        let second = tree.add(b, "'0'", None).unwrap();
        tree.add_public_subscope(root, a);
        tree.add_public_subscope(root, b);
        assert_eq!(tree.search(root, "'0'"), vec![first, second]);
    }

    #[test]
    fn stack_returns_to_saved_scope() {
        let (mut tree, root) = tree_with_root();
        let pkg = tree.alloc_scope(None, Some(root));
        let other = tree.alloc_scope(None, Some(root));
        let mut stack = ScopeStack::new(root);
        stack.push(pkg);
        // re-entering a scope whose outer link is unrelated to the current one
        stack.push(other);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), other);
        assert_eq!(stack.current(), pkg);
        stack.pop();
        assert_eq!(stack.current(), root);
        assert_eq!(stack.balance().is_balanced(), true);
    }

    #[test]
    fn unwind_to_depth() {
        let (mut tree, root) = tree_with_root();
        let a = tree.alloc_scope(None, Some(root));
        let b = tree.alloc_scope(None, Some(a));
        let mut stack = ScopeStack::new(root);
        stack.push(a);
        stack.push(b);
        stack.unwind(1);
        assert_eq!(stack.current(), a);
        assert_eq!(
            stack.balance(),
            ScopeBalance {
                pushes: 2,
                pops: 1,
                depth: 1
            }
        );
        assert_eq!(stack.balance().is_balanced(), false);
    }

    #[test]
    #[should_panic]
    fn popping_root_panics() {
        let (_, root) = tree_with_root();
        let mut stack = ScopeStack::new(root);
        stack.pop();
    }
}
