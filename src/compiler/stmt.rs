use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, FunctionStmt, IfStmt},
        types::Type,
    },
    errors::errors::CodegenFault,
    type_checker::builtins::is_builtin_function,
};

use super::{compiler::Compiler, expr::gen_expression};

pub fn gen_statement(compiler: &mut Compiler, statement: &Stmt) -> Result<(), CodegenFault> {
    match statement {
        Stmt::Expression(expression) => {
            let value = gen_expression(compiler, &expression.expression)?;
            compiler.emit_line(&format!("{};", value.name));
        }
        Stmt::Init(init) => {
            let value = gen_expression(compiler, &init.value)?;
            compiler.declare_local(&init.identifier, value.type_);
            compiler.emit_line(&format!("{} {} = {};", value.type_, init.identifier, value.name));
        }
        Stmt::Assign(assign) => {
            let value = gen_expression(compiler, &assign.value)?;
            compiler.local(&assign.target)?;
            compiler.emit_line(&format!("{} = {};", assign.target, value.name));
        }
        Stmt::Return(return_stmt) => {
            let value = gen_expression(compiler, &return_stmt.value)?;
            compiler.emit_line(&format!("return {};", value.name));
        }
        Stmt::If(if_stmt) => gen_if(compiler, if_stmt)?,
        Stmt::Block(block) => {
            compiler.emit_line("{");
            gen_block(compiler, block)?;
            compiler.emit_line("}");
        }
    }

    Ok(())
}

/// Lowers the reachable statements of a block one level deeper.
pub fn gen_block(compiler: &mut Compiler, block: &BlockStmt) -> Result<(), CodegenFault> {
    compiler.indent();
    for statement in block.reachable() {
        gen_statement(compiler, statement)?;
    }
    compiler.dedent();

    Ok(())
}

fn gen_if(compiler: &mut Compiler, if_stmt: &IfStmt) -> Result<(), CodegenFault> {
    let condition = gen_expression(compiler, &if_stmt.condition)?;

    compiler.emit_line(&format!("if ({}.val == true) {{", condition.name));
    gen_block(compiler, &if_stmt.consequent)?;
    compiler.emit_line("} else {");
    gen_block(compiler, &if_stmt.alternative)?;
    compiler.emit_line("}");

    Ok(())
}

pub fn gen_function(compiler: &mut Compiler, function: &FunctionStmt) -> Result<(), CodegenFault> {
    if is_builtin_function(&function.name) {
        return Err(CodegenFault::BuiltinRedefinition { function: function.name.clone() });
    }

    compiler.locals.clear();
    let parameters: Vec<String> = function
        .parameters
        .iter()
        .map(|parameter| {
            compiler.declare_local(&parameter.name, parameter.type_);
            format!("{} {}", parameter.type_, parameter.name)
        })
        .collect();

    compiler.emit_line(&format!(
        "{} {}({}) {{",
        function.return_type,
        function.name,
        parameters.join(", ")
    ));
    gen_block(compiler, &function.body)?;

    if function.return_type == Type::Nothing && !function.body.has_direct_return() {
        compiler.indent();
        compiler.emit_line("return Nothing();");
        compiler.dedent();
    }

    compiler.emit_line("}");

    Ok(())
}
