use std::collections::HashSet;

use log::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{CallExpr, InfixExpr, ResolvedCall},
        statements::{AssignStmt, BlockStmt, FunctionStmt, IfStmt, InitStmt, ReturnStmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    builtins::{is_reserved_identifier, Signature, BUILTIN_FUNCTIONS},
    environment::Environment,
};

/// State of one type checking run.
///
/// `scopes` records which bindings are visible at the current point; the
/// bindings themselves, and their types, live in the flat `environment`.
pub struct TypeChecker {
    pub environment: Environment,
    scopes: Vec<HashSet<String>>,
    current_function: Option<(String, Type)>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            environment: Environment::new(),
            scopes: vec![HashSet::new()],
            current_function: None,
        }
    }

    fn make_visible(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string());
        }
    }

    /// Rejects names the generated C++ cannot declare, and names that would
    /// hide a declared function.
    fn check_binding_name(&self, name: &str, position: &Position) -> Result<(), Error> {
        if is_reserved_identifier(name) {
            return Err(Error::new(
                ErrorImpl::ReservedIdentifier { ident: name.to_string() },
                position.clone(),
            ));
        }

        if self.environment.get_function_signature(name).is_some() {
            return Err(Error::new(
                ErrorImpl::IdentAlreadyExists { ident: name.to_string() },
                position.clone(),
            ));
        }

        Ok(())
    }

    fn is_visible(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains(name))
    }

    /// Looks up a binding that must be both bound and visible here.
    fn lookup(&self, name: &str, position: &Position) -> Result<Type, Error> {
        match self.environment.get(name) {
            Some(type_) if self.is_visible(name) => Ok(type_),
            _ => Err(Error::new(
                ErrorImpl::IdentNotExist { ident: name.to_string() },
                position.clone(),
            )),
        }
    }

    /// Checks `block` inside a fresh visibility scope holding `visible`.
    fn type_check_scoped_block(
        &mut self,
        block: &mut BlockStmt,
        visible: HashSet<String>,
    ) -> Result<Type, Error> {
        self.scopes.push(visible);
        let result = self.type_check_block(block);
        self.scopes.pop();

        result
    }

    /// The type of a block is the type of its first direct `return`, or
    /// `Nothing` without one. Statements after that return are not checked.
    pub fn type_check_block(&mut self, block: &mut BlockStmt) -> Result<Type, Error> {
        for stmt in block.body.iter_mut() {
            if let Some(type_) = self.type_check_stmt(stmt)? {
                return Ok(type_);
            }
        }

        Ok(Type::Nothing)
    }

    /// Returns the type of the returned value for a `return` statement, and
    /// `None` for every other statement.
    pub fn type_check_stmt(&mut self, stmt: &mut Stmt) -> Result<Option<Type>, Error> {
        trace!("checking statement at {}", stmt.get_span().start.0);

        match stmt {
            Stmt::Init(init) => self.type_check_init(init).map(|_| None),
            Stmt::Assign(assign) => self.type_check_assign(assign).map(|_| None),
            Stmt::Expression(expression) => self.type_check_expr(&mut expression.expression).map(|_| None),
            Stmt::If(if_stmt) => self.type_check_if(if_stmt).map(|_| None),
            Stmt::Block(block) => self
                .type_check_scoped_block(block, HashSet::new())
                .map(|_| None),
            Stmt::Return(return_stmt) => self.type_check_return(return_stmt).map(Some),
        }
    }

    fn type_check_init(&mut self, init: &mut InitStmt) -> Result<(), Error> {
        self.check_binding_name(&init.identifier, &init.span.start)?;

        if self.environment.ident_exists(&init.identifier) {
            return Err(Error::new(
                ErrorImpl::IdentAlreadyExists { ident: init.identifier.clone() },
                init.span.start.clone(),
            ));
        }

        let type_ = self.type_check_expr(&mut init.value)?;
        self.environment.set(&init.identifier, type_);
        self.make_visible(&init.identifier);

        Ok(())
    }

    fn type_check_assign(&mut self, assign: &mut AssignStmt) -> Result<(), Error> {
        let received = self.type_check_expr(&mut assign.value)?;
        let expected = self.lookup(&assign.target, &assign.span.start)?;

        if expected != received {
            return Err(Error::new(
                ErrorImpl::InvalidTypeAssignment {
                    ident: assign.target.clone(),
                    expected,
                    received,
                },
                assign.span.start.clone(),
            ));
        }

        Ok(())
    }

    fn type_check_if(&mut self, if_stmt: &mut IfStmt) -> Result<(), Error> {
        let condition = self.type_check_expr(&mut if_stmt.condition)?;
        if condition != Type::Bool {
            return Err(Error::new(
                ErrorImpl::ConditionNotBool { received: condition },
                if_stmt.condition.get_span().start.clone(),
            ));
        }

        // Branch types are not unified, the `if` itself has no type.
        self.type_check_scoped_block(&mut if_stmt.consequent, HashSet::new())?;
        self.type_check_scoped_block(&mut if_stmt.alternative, HashSet::new())?;

        Ok(())
    }

    fn type_check_return(&mut self, return_stmt: &mut ReturnStmt) -> Result<Type, Error> {
        let Some((function, expected)) = self.current_function.clone() else {
            return Err(Error::new(
                ErrorImpl::ReturnOutsideFunction,
                return_stmt.span.start.clone(),
            ));
        };

        let received = self.type_check_expr(&mut return_stmt.value)?;
        if received != expected {
            return Err(Error::new(
                ErrorImpl::IncorrectReturnType { function, expected, received },
                return_stmt.span.start.clone(),
            ));
        }

        Ok(received)
    }

    pub fn type_check_function(&mut self, function: &mut FunctionStmt) -> Result<(), Error> {
        if BUILTIN_FUNCTIONS.contains_key(function.name.as_str()) {
            return Err(Error::new(
                ErrorImpl::ReservedFunctionName { function: function.name.clone() },
                function.span.start.clone(),
            ));
        }

        if is_reserved_identifier(&function.name) {
            return Err(Error::new(
                ErrorImpl::ReservedIdentifier { ident: function.name.clone() },
                function.span.start.clone(),
            ));
        }

        if self.environment.get_function_signature(&function.name).is_some() {
            return Err(Error::new(
                ErrorImpl::FunctionAlreadyExists { function: function.name.clone() },
                function.span.start.clone(),
            ));
        }

        let mut visible = HashSet::new();
        for parameter in function.parameters.iter() {
            self.check_binding_name(&parameter.name, &function.span.start)?;
            if !visible.insert(parameter.name.clone()) {
                return Err(Error::new(
                    ErrorImpl::IdentAlreadyExists { ident: parameter.name.clone() },
                    function.span.start.clone(),
                ));
            }
            self.environment.set(&parameter.name, parameter.type_);
        }

        self.current_function = Some((function.name.clone(), function.return_type));
        let result = self.type_check_scoped_block(&mut function.body, visible);
        self.current_function = None;

        let received = result?;
        if received != function.return_type {
            return Err(Error::new(
                ErrorImpl::IncorrectReturnType {
                    function: function.name.clone(),
                    expected: function.return_type,
                    received,
                },
                function.span.start.clone(),
            ));
        }

        let signature = Signature::new(
            function.return_type,
            function.parameters.iter().map(|parameter| parameter.type_).collect(),
        );
        debug!("registered function `{}`: {:?}", function.name, signature);
        self.environment.set_function_signature(&function.name, signature);

        Ok(())
    }

    pub fn type_check_expr(&mut self, expr: &mut Expr) -> Result<Type, Error> {
        match expr {
            Expr::Integer(_) => Ok(Type::Int),
            Expr::String(_) => Ok(Type::String),
            Expr::Boolean(_) => Ok(Type::Bool),
            Expr::Identifier(identifier) => self.lookup(&identifier.value, &identifier.span.start),
            Expr::Infix(infix) => self.type_check_infix(infix),
            Expr::Call(call) => self.type_check_call(call),
        }
    }

    fn type_check_infix(&mut self, infix: &mut InfixExpr) -> Result<Type, Error> {
        let left = self.type_check_expr(&mut infix.left)?;
        let right = self.type_check_expr(&mut infix.right)?;
        let position = infix.span.start.clone();

        if left != right {
            return Err(Error::new(ErrorImpl::IncompatibleTypes { left, right }, position));
        }

        let method_not_exist = |method: String| {
            Error::new(ErrorImpl::MethodNotExist { method, type_: left }, position.clone())
        };

        let Some(method) = infix.operator.method() else {
            return Err(method_not_exist(infix.operator.symbol().to_string()));
        };
        let Some(signature) = self.environment.get_method(left, method) else {
            return Err(method_not_exist(method.mnemonic().to_string()));
        };

        if signature.params.first() != Some(&right) {
            return Err(Error::new(ErrorImpl::IncompatibleTypes { left, right }, position));
        }

        trace!("resolved `{}` on {} to {}", infix.operator, left, method);
        infix.resolved_type = Some(left);

        Ok(signature.return_type)
    }

    fn type_check_call(&mut self, call: &mut CallExpr) -> Result<Type, Error> {
        if let Some(method) = BUILTIN_FUNCTIONS.get(call.name.as_str()).copied() {
            if call.arguments.len() != 1 {
                return Err(Error::new(
                    ErrorImpl::IncorrectArgumentCount { expected: 1, received: call.arguments.len() },
                    call.span.start.clone(),
                ));
            }

            let receiver = self.type_check_expr(&mut call.arguments[0])?;
            let Some(signature) = self.environment.get_method(receiver, method) else {
                return Err(Error::new(
                    ErrorImpl::MethodNotExist { method: method.mnemonic().to_string(), type_: receiver },
                    call.arguments[0].get_span().start.clone(),
                ));
            };

            call.resolved = Some(ResolvedCall::Builtin { method, receiver });
            return Ok(signature.return_type);
        }

        let Some(signature) = self.environment.get_function_signature(&call.name).cloned() else {
            return Err(Error::new(
                ErrorImpl::FunctionNotExist { function: call.name.clone() },
                call.span.start.clone(),
            ));
        };

        if call.arguments.len() != signature.params.len() {
            return Err(Error::new(
                ErrorImpl::IncorrectArgumentCount {
                    expected: signature.params.len(),
                    received: call.arguments.len(),
                },
                call.span.start.clone(),
            ));
        }

        for (index, (argument, expected)) in call.arguments.iter_mut().zip(signature.params.iter()).enumerate() {
            let received = self.type_check_expr(argument)?;
            if received != *expected {
                return Err(Error::new(
                    ErrorImpl::IncorrectArgumentType {
                        position: index + 1,
                        expected: *expected,
                        received,
                    },
                    argument.get_span().start.clone(),
                ));
            }
        }

        call.resolved = Some(ResolvedCall::Function);
        Ok(signature.return_type)
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        TypeChecker::new()
    }
}

/// Checks a whole program and annotates it in place.
///
/// Functions are checked first, in declaration order, and each one becomes
/// callable once it has been validated. The top-level statements follow.
/// The environment built along the way is handed back for code generation.
pub fn type_check(program: &mut Program) -> Result<Environment, Error> {
    let mut type_checker = TypeChecker::new();

    for function in program.functions.iter_mut() {
        type_checker.type_check_function(function)?;
    }

    for stmt in program.statements.iter_mut() {
        type_checker.type_check_stmt(stmt)?;
    }

    debug!(
        "checked {} functions and {} top-level statements",
        program.functions.len(),
        program.statements.len()
    );

    Ok(type_checker.environment)
}
