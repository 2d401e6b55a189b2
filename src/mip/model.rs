//! Solver-agnostic linear model description.

/// Domain of a decision variable. Every variable is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// 0/1 variable.
    Binary,
    /// Integer variable.
    Integer,
    /// Real-valued variable.
    Continuous,
}

impl VarKind {
    /// Lower and upper bound implied by the domain.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            VarKind::Binary => (0.0, 1.0),
            VarKind::Integer | VarKind::Continuous => (0.0, f64::INFINITY),
        }
    }
}

/// A decision variable with its objective coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Human-readable name, e.g. `x_0_3`.
    pub name: String,
    /// Variable domain.
    pub kind: VarKind,
    /// Coefficient in the objective function.
    pub objective: f64,
}

/// Relation between the left-hand side and the right-hand side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// `lhs <= rhs`
    LessEqual,
    /// `lhs == rhs`
    Equal,
    /// `lhs >= rhs`
    GreaterEqual,
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// Minimize the objective.
    Minimize,
    /// Maximize the objective.
    Maximize,
}

/// A linear constraint `Σ coef·x[col] (sense) rhs`.
///
/// # Examples
///
/// ```
/// use or_routing::mip::{ConstraintSense, LinearConstraint};
///
/// let c = LinearConstraint::new("cap", vec![(0, 1.0), (1, 1.0)], ConstraintSense::LessEqual, 1.0);
/// assert!(c.is_satisfied(&[1.0, 0.0], 1e-9));
/// assert!(!c.is_satisfied(&[1.0, 1.0], 1e-9));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Constraint name.
    pub name: String,
    /// `(column, coefficient)` pairs.
    pub terms: Vec<(usize, f64)>,
    /// Relation to the right-hand side.
    pub sense: ConstraintSense,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Creates a constraint.
    pub fn new(
        name: impl Into<String>,
        terms: Vec<(usize, f64)>,
        sense: ConstraintSense,
        rhs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            terms,
            sense,
            rhs,
        }
    }

    /// Evaluates the left-hand side at the given point.
    ///
    /// Columns outside `values` contribute zero.
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(col, coef)| coef * values.get(col).copied().unwrap_or(0.0))
            .sum()
    }

    /// Returns `true` if the point satisfies this constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            ConstraintSense::LessEqual => lhs <= self.rhs + tol,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tol,
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tol,
        }
    }
}

/// A mixed-integer linear model handed to an external solver.
///
/// Columns are addressed by the index returned from [`MipModel::add_var`].
#[derive(Debug, Clone)]
pub struct MipModel {
    name: String,
    sense: ObjectiveSense,
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective_offset: f64,
    lazy_constraints: bool,
}

impl MipModel {
    /// Creates an empty minimization model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sense: ObjectiveSense::Minimize,
            variables: Vec::new(),
            constraints: Vec::new(),
            objective_offset: 0.0,
            lazy_constraints: false,
        }
    }

    /// Sets the optimization direction.
    pub fn with_sense(mut self, sense: ObjectiveSense) -> Self {
        self.sense = sense;
        self
    }

    /// Declares that lazy constraints will be added from a callback.
    pub fn with_lazy_constraints(mut self, enabled: bool) -> Self {
        self.lazy_constraints = enabled;
        self
    }

    /// Adds a variable and returns its column index.
    pub fn add_var(&mut self, name: impl Into<String>, kind: VarKind, objective: f64) -> usize {
        self.variables.push(Variable {
            name: name.into(),
            kind,
            objective,
        });
        self.variables.len() - 1
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Adds a constant term to the objective.
    pub fn add_objective_offset(&mut self, constant: f64) {
        self.objective_offset += constant;
    }

    /// Constant term of the objective.
    pub fn objective_offset(&self) -> f64 {
        self.objective_offset
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optimization direction.
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Declared variables, in column order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Number of columns.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Static constraints.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Looks up a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Whether the solver must accept lazy constraints.
    pub fn lazy_constraints(&self) -> bool {
        self.lazy_constraints
    }

    /// Objective value at the given point, constant term included.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective_offset
            + self
                .variables
                .iter()
                .zip(values)
                .map(|(v, &x)| v.objective * x)
                .sum::<f64>()
    }

    /// Returns `true` if `values` respects every variable domain and every
    /// static constraint within `tol`.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let in_domain = self.variables.iter().zip(values).all(|(v, &x)| {
            let (lb, ub) = v.kind.bounds();
            let integral = v.kind == VarKind::Continuous || (x - x.round()).abs() <= tol;
            x >= lb - tol && x <= ub + tol && integral
        });
        in_domain && self.constraints.iter().all(|c| c.is_satisfied(values, tol))
    }
}
