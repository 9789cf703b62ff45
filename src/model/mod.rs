//! Class hierarchy model
//!
//! An in-memory, order-preserving description of service classes and
//! interfaces: their declared methods, the annotation data the exposure rules
//! look at, and the name of their direct supertype.

pub mod registry;

use std::fmt;

use crate::common::consts::{CONSTRUCTOR_METHOD, STATIC_INITIALIZER_METHOD};

pub use registry::Registry;

/// Whether a hierarchy node is an interface or a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Interface,
    Class,
}

/// Tri-state reading of the operation-marker annotation on a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExclusionFlag {
    /// Annotated with `exclude = true`
    Excluded,
    /// Annotated, not excluded
    Included,
    /// No operation-marker annotation
    #[default]
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_final: bool,
}

/// Method name plus ordered parameter types; the override key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub name: String,
    pub param_types: Vec<String>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.param_types.join(", "))
    }
}

/// Customisation carried by the operation-marker annotation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebMethodMeta {
    pub operation_name: Option<String>,
    pub action: Option<String>,
}

/// A declared method considered for exposure as an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCandidate {
    signature: Signature,
    pub return_type: Option<String>,
    pub modifiers: Modifiers,
    pub exclusion: ExclusionFlag,
    pub web_method: WebMethodMeta,
    /// Declared fault (exception) types, in declaration order
    pub faults: Vec<String>,
    declaring_class: Option<String>,
}

impl MethodCandidate {
    pub fn new<I, S>(name: impl Into<String>, param_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signature: Signature {
                name: name.into(),
                param_types: param_types.into_iter().map(Into::into).collect(),
            },
            return_type: None,
            modifiers: Modifiers::default(),
            exclusion: ExclusionFlag::Unspecified,
            web_method: WebMethodMeta::default(),
            faults: Vec::new(),
            declaring_class: None,
        }
    }

    pub fn with_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    pub fn with_final(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionFlag) -> Self {
        self.exclusion = exclusion;
        self
    }

    /// Mark as carrying the operation-marker annotation with the given customisation
    pub fn with_web_method(mut self, meta: WebMethodMeta) -> Self {
        if self.exclusion == ExclusionFlag::Unspecified {
            self.exclusion = ExclusionFlag::Included;
        }
        self.web_method = meta;
        self
    }

    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn throwing(mut self, fault: impl Into<String>) -> Self {
        self.faults.push(fault.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn param_types(&self) -> &[String] {
        &self.signature.param_types
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Set only on entries of a resolution result
    pub fn declaring_class(&self) -> Option<&str> {
        self.declaring_class.as_deref()
    }

    /// Copy of this method as accepted from `class_name`
    pub(crate) fn accepted_from(&self, class_name: &str) -> Self {
        let mut accepted = self.clone();
        accepted.declaring_class = Some(class_name.to_string());
        accepted
    }

    /// Exposed operation name: the annotation override, else the method name
    pub fn operation_name(&self) -> &str {
        match self.web_method.operation_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.name(),
        }
    }

    pub fn action(&self) -> &str {
        self.web_method.action.as_deref().unwrap_or("")
    }

    /// Carries the operation-marker annotation at all
    pub fn is_annotated(&self) -> bool {
        self.exclusion != ExclusionFlag::Unspecified
    }

    /// Initializers are never operations
    pub fn is_initializer(&self) -> bool {
        self.name() == CONSTRUCTOR_METHOD || self.name() == STATIC_INITIALIZER_METHOD
    }
}

/// One class or interface of a service hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    name: String,
    kind: NodeKind,
    methods: Vec<MethodCandidate>,
    super_name: String,
    service_annotated: bool,
    wsdl_location: Option<String>,
}

impl HierarchyNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            methods: Vec::new(),
            super_name: String::new(),
            service_annotated: false,
            wsdl_location: None,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Interface)
    }

    pub fn extends(mut self, super_name: impl Into<String>) -> Self {
        self.super_name = super_name.into();
        self
    }

    pub fn service(mut self) -> Self {
        self.service_annotated = true;
        self
    }

    pub fn wsdl(mut self, location: impl Into<String>) -> Self {
        self.wsdl_location = Some(location.into());
        self
    }

    pub fn method(mut self, method: MethodCandidate) -> Self {
        self.methods.push(method);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == NodeKind::Interface
    }

    pub fn methods(&self) -> &[MethodCandidate] {
        &self.methods
    }

    /// Direct superclass or super-interface; empty when none
    pub fn super_name(&self) -> &str {
        &self.super_name
    }

    pub fn is_service_annotated(&self) -> bool {
        self.service_annotated
    }

    pub fn wsdl_location(&self) -> Option<&str> {
        self.wsdl_location.as_deref().filter(|l| !l.trim().is_empty())
    }
}
