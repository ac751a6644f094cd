//! Method resolution for dispatched calls
//!
//! The registry turns "which local call is this" into "which remote
//! method, with which declared return type". Remote types and their
//! methods are declared once, at setup time; each call then resolves
//! against that table instead of any runtime reflection.
//!
//! # Resolution Policy
//!
//! Candidates are filtered by name, arity, and positional argument
//! acceptance, in the order the methods were registered. The first
//! surviving candidate wins — first-match, not best-match. When two
//! overloads both accept the arguments, registration order decides;
//! this is a deliberate simplicity trade-off and is part of the
//! contract.
//!
//! # Implicit Dispatch
//!
//! A caller that wants "dispatch this as myself" passes a [`CallSite`]
//! naming its own type and method. If the registry holds a redirect for
//! that type (configured at construction, the equivalent of pointing a
//! local facade at a remote interface), the remote type's name is
//! substituted before resolution.
//!
//! # Examples
//!
//! ```rust
//! use remit_client::{MethodRegistry, MethodSpec, ParamType, ReturnKind, TypeSpec};
//! use serde_json::json;
//!
//! let registry = MethodRegistry::new().register(
//!     TypeSpec::new("Calculator")
//!         .method(MethodSpec::new("add", [ParamType::Number, ParamType::Number], ReturnKind::Value)),
//! );
//!
//! let descriptor = registry
//!     .resolve("Calculator", "add", &[json!(2), json!(3)])
//!     .unwrap();
//! assert_eq!(descriptor.qualified_name, "Calculator.add");
//! ```

use remit_core::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;

/// JSON-shape class a declared parameter accepts
///
/// Arguments are matched positionally against the declared classes;
/// `Any` accepts every value including null, the others accept exactly
/// their JSON type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    /// JSON string
    String,
    /// JSON number (integer or float)
    Number,
    /// JSON boolean
    Bool,
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// Any value, null included
    Any,
}

impl ParamType {
    /// Whether this parameter class accepts the given runtime value
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Bool => value.is_boolean(),
            ParamType::Object => value.is_object(),
            ParamType::Array => value.is_array(),
            ParamType::Any => true,
        }
    }
}

/// Declared return type of a registered method
///
/// Drives how the pipeline treats the raw result payload: `Unit`
/// methods discard it without conversion, `Value` methods convert it
/// into the caller's expected type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnKind {
    /// The "no value" type; the result payload is never converted
    Unit,
    /// A real value the caller expects back
    Value,
}

/// One registered remote method
#[derive(Clone, Debug)]
pub struct MethodSpec {
    name: String,
    params: Vec<ParamType>,
    return_kind: ReturnKind,
    ignored: bool,
}

impl MethodSpec {
    /// Declare a method with its positional parameter classes
    pub fn new(
        name: impl Into<String>,
        params: impl IntoIterator<Item = ParamType>,
        return_kind: ReturnKind,
    ) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            return_kind,
            ignored: false,
        }
    }

    /// Mark this method as excluded from dispatch
    ///
    /// An ignored method is never selected, even when name and arity
    /// match; resolution behaves as if it were not declared.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// A remote type and its methods, in declaration order
///
/// Declaration order is the stable enumeration order used for
/// first-match overload ties.
#[derive(Clone, Debug)]
pub struct TypeSpec {
    name: String,
    methods: Vec<MethodSpec>,
}

impl TypeSpec {
    /// Declare a remote type by name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method declaration
    pub fn method(mut self, spec: MethodSpec) -> Self {
        self.methods.push(spec);
        self
    }
}

/// Explicit caller identity for implicit dispatch
///
/// Replaces call-stack introspection: the caller states its own type
/// and method names, and the registry applies any configured redirect
/// before resolving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    /// The calling type's name
    pub type_name: String,
    /// The calling method's name
    pub method: String,
}

impl CallSite {
    /// Describe a call site by type and method name
    pub fn new(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            method: method.into(),
        }
    }
}

/// Resolved dispatch target, produced once per call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// `"<type>.<method>"`, used as the wire method name
    pub qualified_name: String,
    /// Declared return type of the selected overload
    pub return_kind: ReturnKind,
}

/// Registration table mapping type names to declared methods
///
/// Built once at setup with builder-style `register`/`redirect` calls,
/// then shared read-only by every call.
#[derive(Clone, Debug, Default)]
pub struct MethodRegistry {
    types: HashMap<String, TypeSpec>,
    redirects: HashMap<String, String>,
}

impl MethodRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a remote type
    ///
    /// Registering a type with an already-registered name replaces the
    /// earlier declaration.
    pub fn register(mut self, spec: TypeSpec) -> Self {
        self.types.insert(spec.name.clone(), spec);
        self
    }

    /// Redirect implicit dispatch from a local type to a remote one
    ///
    /// Calls resolved from a [`CallSite`] whose type matches `local`
    /// are dispatched under `remote`'s name instead.
    pub fn redirect(mut self, local: impl Into<String>, remote: impl Into<String>) -> Self {
        self.redirects.insert(local.into(), remote.into());
        self
    }

    /// Resolve an explicit target type, method name and argument list
    ///
    /// Filters the type's declared methods by name, arity and
    /// positional argument acceptance, skipping ignored methods, and
    /// picks the first match in declaration order.
    ///
    /// # Errors
    ///
    /// `Error::Resolution` when the type is unknown or no declared
    /// method matches.
    pub fn resolve(
        &self,
        type_name: &str,
        method_name: &str,
        args: &[Value],
    ) -> Result<MethodDescriptor> {
        let spec = self
            .types
            .get(type_name)
            .ok_or_else(|| Error::Resolution(format!("unknown target type {type_name}")))?;

        let method = spec
            .methods
            .iter()
            .filter(|m| m.name == method_name)
            .filter(|m| !m.ignored)
            .filter(|m| m.params.len() == args.len())
            .find(|m| m.params.iter().zip(args).all(|(p, a)| p.accepts(a)))
            .ok_or_else(|| {
                Error::Resolution(format!(
                    "no method {method_name} on {type_name} with the given parameters"
                ))
            })?;

        Ok(MethodDescriptor {
            qualified_name: format!("{type_name}.{method_name}"),
            return_kind: method.return_kind,
        })
    }

    /// Resolve from an explicit caller descriptor
    ///
    /// Substitutes the redirect target for the caller's own type when
    /// one is configured, then delegates to [`resolve`](Self::resolve).
    pub fn resolve_from_caller(&self, site: &CallSite, args: &[Value]) -> Result<MethodDescriptor> {
        let type_name = self
            .redirects
            .get(&site.type_name)
            .map(String::as_str)
            .unwrap_or(&site.type_name);
        self.resolve(type_name, &site.method, args)
    }
}
