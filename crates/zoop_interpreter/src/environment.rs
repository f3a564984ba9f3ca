//! Variable scopes, the zoop registry and the stack of zoop argument contexts

use crate::error::RuntimeErrorKind;
use crate::routine::Routine;
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::HashMap;
use zoop_ast::expr::Variable;
use zoop_ast::literal::Literal;
use zoop_common::bounded_stack::BoundedStack;

/// How many zoop calls may be active at once
pub const MAX_ROUTINE_CONTEXTS: usize = 20;

/// The arguments of one active zoop call, by parameter name
pub type RoutineContext = IndexMap<String, Literal>;

/// What opened a scope
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScopeKind {
    Global,
    /// A `{ }` block or a conditional branch
    Block,
    /// The body of a running zoop
    RoutineBody,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    mutables: HashMap<String, Literal>,
    immutables: HashMap<String, Literal>,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            mutables: HashMap::new(),
            immutables: HashMap::new(),
        }
    }

    fn space(&self, mutable: bool) -> &HashMap<String, Literal> {
        if mutable {
            &self.mutables
        } else {
            &self.immutables
        }
    }
}

/// All runtime state of a single program run.
///
/// Scopes form a stack. Every scope falls back to the one below it, so a zoop body sees the
/// bindings of whoever called it.
#[derive(Debug)]
pub struct Environment<'p> {
    scopes: Vec<Scope>,
    routines: HashMap<String, Routine<'p>>,
    contexts: BoundedStack<RoutineContext>,
}

impl<'p> Environment<'p> {
    /// Creates an environment holding only an empty global scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Global)],
            routines: HashMap::new(),
            contexts: BoundedStack::new(MAX_ROUTINE_CONTEXTS),
        }
    }

    fn in_global(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Enters a new innermost scope
    pub fn push_scope(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
        trace!("entered {kind:?} scope at depth {}", self.scopes.len());
    }

    /// Leaves the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.in_global() {
            return;
        }
        if let Some(scope) = self.scopes.pop() {
            trace!("left {:?} scope at depth {}", scope.kind, self.scopes.len() + 1);
        }
    }

    /// Looks a variable up, starting from the current scope.
    ///
    /// Immutable names are looked for in the running zoop's arguments first.
    pub fn get_value(&self, variable: &Variable) -> Result<&Literal, RuntimeErrorKind> {
        if !variable.mutable {
            if let Some(literal) = self.peek_context().and_then(|ctx| ctx.get(&variable.name)) {
                return Ok(literal);
            }
        }
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.space(variable.mutable).get(&variable.name))
            .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(variable.clone()))
    }

    /// Binds a new variable in the current scope. Outer bindings of the same name are shadowed.
    pub fn define_variable(
        &mut self,
        variable: &Variable,
        literal: Literal,
    ) -> Result<(), RuntimeErrorKind> {
        let name = &variable.name;
        if !variable.mutable
            && !self.in_global()
            && self.peek_context().is_some_and(|ctx| ctx.contains_key(name))
        {
            return Err(RuntimeErrorKind::ContextRedefinition(name.clone()));
        }

        let depth = self.scopes.len();
        let scope = &mut self.scopes[depth - 1];
        let space = if variable.mutable {
            &mut scope.mutables
        } else {
            &mut scope.immutables
        };
        if space.contains_key(name) {
            return Err(RuntimeErrorKind::Redefinition(name.clone()));
        }
        trace!("defined {variable} = {literal:?} at depth {depth}");
        space.insert(name.clone(), literal);
        Ok(())
    }

    /// Replaces the value of the nearest mutable binding called `name`
    pub fn assign_variable(&mut self, name: &str, literal: Literal) -> Result<(), RuntimeErrorKind> {
        let slot = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.mutables.get_mut(name))
            .ok_or_else(|| RuntimeErrorKind::NotDefined(name.to_string()))?;
        trace!("assigned @{name} = {literal:?}");
        *slot = literal;
        Ok(())
    }

    /// Registers a zoop under its label
    pub fn define_routine(&mut self, routine: Routine<'p>) -> Result<(), RuntimeErrorKind> {
        let label = routine.label();
        if self.routines.contains_key(label) {
            return Err(RuntimeErrorKind::RoutineRedeclared(label.to_string()));
        }
        debug!("declared zoop `{label}`");
        self.routines.insert(label.to_string(), routine);
        Ok(())
    }

    pub fn get_routine(&self, label: &str) -> Result<Routine<'p>, RuntimeErrorKind> {
        self.routines
            .get(label)
            .copied()
            .ok_or_else(|| RuntimeErrorKind::RoutineNotDeclared(label.to_string()))
    }

    /// Makes `context` the arguments that immutable lookups see first
    pub fn push_context(&mut self, context: RoutineContext) -> Result<(), RuntimeErrorKind> {
        self.contexts
            .push(context)
            .map_err(|_| RuntimeErrorKind::ContextOverflow)?;
        debug!("pushed zoop context, {} active", self.contexts.len());
        Ok(())
    }

    pub fn pop_context(&mut self) -> Option<RoutineContext> {
        let popped = self.contexts.pop();
        debug!("popped zoop context, {} active", self.contexts.len());
        popped
    }

    pub fn peek_context(&self) -> Option<&RoutineContext> {
        self.contexts.peek()
    }
}

impl Default for Environment<'_> {
    fn default() -> Self {
        Self::new()
    }
}
