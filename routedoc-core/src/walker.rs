//! Recursive type walker.
//!
//! Walks an [`ApiSchema`] type and produces its own shape plus every
//! transitively reachable named shape, for component registration by the
//! schema emitter.

use std::collections::HashSet;

use crate::shape::{ApiSchema, FieldDescriptor, FieldKind, TypeShape};

/// Everything the walker learns about one type.
#[derive(Debug, Clone)]
pub struct WalkOutput {
    /// Shape of the walked type (the element shape for arrays).
    pub shape: TypeShape,
    /// Field-kind classification of the walked type itself (an
    /// `Array(elem)` for array usage sites).
    pub kind: FieldKind,
    /// Whether the walked usage site is an array of that shape.
    pub is_array: bool,
    /// All transitively reachable named shapes, innermost first, excluding
    /// the root shape itself. Duplicate names are collected once
    /// (first encounter wins).
    pub components: Vec<TypeShape>,
}

/// Walk a type, collecting its shape and all reachable named shapes.
///
/// Reference fields resolve lazily; an in-progress set keyed by type name
/// stops resolution when a name is met a second time, so self-referential
/// and mutually recursive types terminate.
pub fn walk<T: ApiSchema>() -> WalkOutput {
    let shape = T::shape();
    let mut components = Vec::new();
    let mut seen: HashSet<&'static str> = HashSet::new();

    if let Some(name) = shape.name() {
        seen.insert(name);
    }
    collect_fields(shape.fields(), &mut components, &mut seen);

    WalkOutput {
        shape,
        kind: T::field_kind(),
        is_array: T::is_array(),
        components,
    }
}

fn collect_fields(
    fields: &[FieldDescriptor],
    components: &mut Vec<TypeShape>,
    seen: &mut HashSet<&'static str>,
) {
    for field in fields {
        collect_kind(&field.kind, components, seen);
    }
}

fn collect_kind(
    kind: &FieldKind,
    components: &mut Vec<TypeShape>,
    seen: &mut HashSet<&'static str>,
) {
    match kind {
        FieldKind::Array(elem) => collect_kind(elem, components, seen),
        FieldKind::Object(fields) => collect_fields(fields, components, seen),
        FieldKind::Reference(type_ref) => {
            // Second encounter of a name stays a bare reference.
            if seen.insert(type_ref.name()) {
                let shape = type_ref.resolve();
                collect_fields(shape.fields(), components, seen);
                components.push(shape);
            }
        }
        _ => {}
    }
}
