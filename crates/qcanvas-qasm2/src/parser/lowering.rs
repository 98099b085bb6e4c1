//! AST-to-Circuit lowering.
//!
//! Structural problems (duplicate registers, oversize registers) reject the
//! program. Everything that concerns a single statement is recorded in a
//! [`NoticeLog`] and the statement is dropped.

use qcanvas_ir::{
    Circuit, Converted, GateApplication, GateRegistry, NoticeLog, Parameter, QubitId,
    Representation, SkipReason,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::ast::{Argument, Expression, GateCall, Program, Statement};
use crate::error::{ParseError, ParseResult};

/// Lower an AST Program to a Circuit.
pub(crate) fn lower_to_circuit(
    program: &Program,
    registry: &GateRegistry,
) -> ParseResult<Converted<Circuit>> {
    let mut lowerer = Lowerer::new(registry);
    lowerer.lower(program)
}

struct Lowerer<'r> {
    registry: &'r GateRegistry,
    /// Qubit registers: name -> (`start_index`, size).
    qregs: FxHashMap<String, (u32, u32)>,
    /// User-defined and opaque gate names.
    defined_gates: FxHashSet<String>,
    num_qubits: u32,
    gates: Vec<GateApplication>,
    log: NoticeLog,
}

impl<'r> Lowerer<'r> {
    fn new(registry: &'r GateRegistry) -> Self {
        Self {
            registry,
            qregs: FxHashMap::default(),
            defined_gates: FxHashSet::default(),
            num_qubits: 0,
            gates: Vec::new(),
            log: NoticeLog::new(),
        }
    }

    fn lower(&mut self, program: &Program) -> ParseResult<Converted<Circuit>> {
        // First pass: lay out qubit registers in declaration order.
        let mut cregs = FxHashSet::default();
        for stmt in &program.statements {
            match stmt {
                Statement::QregDecl { name, size } => {
                    if self.qregs.contains_key(name) || cregs.contains(name) {
                        return Err(ParseError::DuplicateDeclaration(name.clone()));
                    }
                    let start = self.num_qubits;
                    self.num_qubits = start
                        .checked_add(*size)
                        .ok_or_else(|| ParseError::TooManyQubits(name.clone()))?;
                    self.qregs.insert(name.clone(), (start, *size));
                }
                Statement::CregDecl { name, .. } => {
                    if self.qregs.contains_key(name) || !cregs.insert(name.clone()) {
                        return Err(ParseError::DuplicateDeclaration(name.clone()));
                    }
                }
                Statement::GateDef { name, .. } | Statement::Opaque { name, .. } => {
                    self.defined_gates.insert(name.clone());
                }
                _ => {}
            }
        }

        // Second pass: lower statements.
        for (index, stmt) in program.statements.iter().enumerate() {
            self.lower_statement(index, stmt);
        }

        debug!(
            qubits = self.num_qubits,
            gates = self.gates.len(),
            notices = self.log.notices().len(),
            "lowered QASM program"
        );

        let mut circuit = Circuit::new(self.num_qubits);
        circuit.gates = std::mem::take(&mut self.gates);
        let log = std::mem::take(&mut self.log);
        Ok(log.finish(circuit.with_fresh_stats()))
    }

    fn lower_statement(&mut self, index: usize, stmt: &Statement) {
        match stmt {
            Statement::Include(_)
            | Statement::QregDecl { .. }
            | Statement::CregDecl { .. }
            | Statement::GateDef { .. }
            | Statement::Opaque { .. } => {}

            Statement::Gate(call) => self.lower_gate_call(index, call),

            // The canonical model has no classical bits, so none of these survive.
            Statement::Measure { .. }
            | Statement::Reset(_)
            | Statement::Barrier(_)
            | Statement::If { .. } => {
                let keyword = stmt.keyword().to_string();
                self.log.skip(
                    index,
                    keyword.clone(),
                    SkipReason::NonUnitary { statement: keyword },
                );
            }
        }
    }

    /// Canonical name for a QASM gate name, or `None` if the registry does not know it.
    ///
    /// Tries the registry's QASM identifiers first, then canonical names and
    /// aliases, then the lower-cased spelling so the `U`/`CX` built-ins resolve.
    fn resolve_name(&self, name: &str) -> Option<&'static str> {
        self.registry
            .lookup_canonical(Representation::Qasm2, name)
            .or_else(|| self.registry.canonical_name(name))
            .or_else(|| self.registry.canonical_name(&name.to_ascii_lowercase()))
    }

    fn lower_gate_call(&mut self, index: usize, call: &GateCall) {
        let name = match self.resolve_name(&call.name) {
            Some(canonical) => canonical.to_string(),
            None => {
                let fallback = call.name.to_ascii_lowercase();
                if !self.defined_gates.contains(&call.name) {
                    debug!(gate = %call.name, "call to a gate that was never declared");
                }
                self.log.unrecognized(index, call.name.clone(), fallback.clone());
                fallback
            }
        };

        let parameters: Vec<Parameter> = call.params.iter().map(expr_to_param).collect();
        if let Some(entry) = self.registry.entry(&name) {
            if let Err(mismatch) = entry.check_parameters(&parameters) {
                self.log.skip(index, call.name.clone(), mismatch);
                return;
            }
        }

        let operands = match self.resolve_operands(&call.args) {
            Ok(operands) => operands,
            Err(reason) => {
                self.log.skip(index, call.name.clone(), reason);
                return;
            }
        };

        for qubits in operands {
            let (controls, targets) = match self.registry.split_roles(&name, &qubits) {
                Ok(split) => split,
                Err(mismatch) => {
                    self.log.skip(index, call.name.clone(), mismatch);
                    continue;
                }
            };

            let gate = GateApplication::controlled(name.clone(), controls, targets)
                .with_parameters(parameters.iter().cloned());
            if let Err(e) = gate.validate(self.num_qubits) {
                self.log.skip(
                    index,
                    call.name.clone(),
                    SkipReason::Invalid {
                        detail: e.to_string(),
                    },
                );
                continue;
            }
            self.gates.push(gate);
        }
    }

    /// Resolve arguments to one qubit list per broadcast step.
    ///
    /// `h q;` over a 3-qubit register yields three lists. Whole-register
    /// arguments must agree in size; single qubits repeat.
    fn resolve_operands(&self, args: &[Argument]) -> Result<Vec<Vec<QubitId>>, SkipReason> {
        let mut resolved: Vec<Vec<QubitId>> = Vec::with_capacity(args.len());
        let mut width: Option<usize> = None;

        for arg in args {
            let qubits = self.resolve_argument(arg)?;
            if matches!(arg, Argument::Register(_)) {
                match width {
                    None => width = Some(qubits.len()),
                    Some(w) if w != qubits.len() => {
                        return Err(SkipReason::Invalid {
                            detail: format!(
                                "register '{}' has {} qubits, expected {w}",
                                arg.register(),
                                qubits.len()
                            ),
                        });
                    }
                    Some(_) => {}
                }
            }
            resolved.push(qubits);
        }

        let steps = width.unwrap_or(1);
        Ok((0..steps)
            .map(|i| {
                resolved
                    .iter()
                    .zip(args)
                    .map(|(qubits, arg)| match arg {
                        Argument::Register(_) => qubits[i],
                        Argument::Indexed { .. } => qubits[0],
                    })
                    .collect()
            })
            .collect())
    }

    fn resolve_argument(&self, arg: &Argument) -> Result<Vec<QubitId>, SkipReason> {
        let (start, size) = *self
            .qregs
            .get(arg.register())
            .ok_or_else(|| SkipReason::UnresolvedQubit {
                detail: format!("undefined register '{}'", arg.register()),
            })?;

        match arg {
            Argument::Register(_) => Ok((start..start + size).map(QubitId).collect()),
            Argument::Indexed { name, index } => {
                let offset = u32::try_from(*index)
                    .ok()
                    .filter(|&i| i < size)
                    .ok_or_else(|| SkipReason::UnresolvedQubit {
                        detail: format!(
                            "index {index} out of bounds for register '{name}' of size {size}"
                        ),
                    })?;
                Ok(vec![QubitId(start + offset)])
            }
        }
    }
}

/// Closed expressions become numbers; anything mentioning a free identifier stays text.
fn expr_to_param(expr: &Expression) -> Parameter {
    match expr.as_f64() {
        Some(value) => Parameter::Numeric(value),
        None => Parameter::Symbolic(expr.to_string()),
    }
}
