//! Type descriptors: the language-neutral description of a wire type.
//!
//! A [`TypeShape`] is the ordered field list of one structured type. Field
//! types are classified by [`FieldKind`]; named nested structs are recorded
//! as lazy [`TypeRef`] handles so that self-referential types can be
//! described without recursing at construction time.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Declared width of an integer field, used for the schema `format` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W32,
    W64,
}

/// Declared width of a floating-point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    Single,
    Double,
}

/// Lazy handle to a named nested shape.
///
/// Resolution goes through a function pointer instead of an owned
/// [`TypeShape`], so describing a self-referential type terminates; the
/// walker's in-progress set decides when to actually resolve.
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    resolve: fn() -> TypeShape,
}

impl TypeRef {
    pub fn new(name: &'static str, resolve: fn() -> TypeShape) -> Self {
        Self { name, resolve }
    }

    /// The referenced type's declared name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve the referenced shape.
    pub fn resolve(&self) -> TypeShape {
        (self.resolve)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Classification of a field's wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Bool,
    /// Timestamp type, emitted as a string with a `date-time` format hint
    /// and never walked as an object.
    DateTime,
    Array(Box<FieldKind>),
    /// Anonymous inline object. Never registered as a component and never
    /// deduplicated.
    Object(Vec<FieldDescriptor>),
    /// Named nested struct, emitted as a `$ref` to a shared component.
    Reference(TypeRef),
    /// Free-form value; degrades to an empty schema node.
    Unknown,
}

/// One field of a structured type, keyed by its wire name.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Wire name after rename resolution.
    pub name: String,
    pub kind: FieldKind,
    /// Present in the emitter's `required` list and enforced by the
    /// structural validator.
    pub required: bool,
    /// Whether JSON null (or absence) is a valid value.
    pub nullable: bool,
}

impl FieldDescriptor {
    /// A required, non-nullable field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            nullable: false,
        }
    }

    /// Mark the field optional (carries an omit-if-empty marker).
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Mark the field nullable. Nullable fields are never required.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self.required = false;
        self
    }
}

/// The ordered field list of one structured type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeShape {
    name: Option<&'static str>,
    fields: Vec<FieldDescriptor>,
}

impl TypeShape {
    /// Shape of a named struct, eligible for component registration.
    pub fn named(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: Some(name),
            fields,
        }
    }

    /// Shape of an anonymous/inline struct.
    pub fn anonymous(fields: Vec<FieldDescriptor>) -> Self {
        Self { name: None, fields }
    }

    /// Declared type name, `None` for anonymous shapes.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by its wire name.
    pub fn field(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == wire_name)
    }
}

/// Types that can describe their own wire shape.
///
/// Implemented for primitives and standard containers here, and derived for
/// application structs with `#[derive(ApiSchema)]`. Manual [`TypeShape`]
/// construction via [`TypeShape::named`] / [`TypeShape::anonymous`] is the
/// non-derive fallback.
///
/// All items are associated functions: a shape is a property of the type,
/// never of a particular value.
pub trait ApiSchema {
    /// Declared type name; `None` for primitives, containers, and anonymous
    /// shapes.
    fn schema_name() -> Option<&'static str> {
        None
    }

    /// How this type is classified when it appears as a field of another
    /// type.
    fn field_kind() -> FieldKind;

    /// Field list when this type is used as a top-level body schema.
    /// Containers delegate to their element type; primitives have no fields.
    fn shape() -> TypeShape {
        TypeShape::anonymous(Vec::new())
    }

    /// Whether a usage site of this type is an array. Array-ness is a
    /// property of the usage site, not of the element type, so it is
    /// reported separately from [`ApiSchema::shape`].
    fn is_array() -> bool {
        false
    }

    /// Whether absence or JSON null is a valid value for this type.
    fn is_nullable() -> bool {
        false
    }
}

macro_rules! impl_primitive {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl ApiSchema for $ty {
                fn field_kind() -> FieldKind {
                    $kind
                }
            }
        )*
    };
}

impl_primitive! {
    String => FieldKind::String,
    &str => FieldKind::String,
    Cow<'_, str> => FieldKind::String,
    bool => FieldKind::Bool,
    i8 => FieldKind::Int(IntWidth::W32),
    i16 => FieldKind::Int(IntWidth::W32),
    i32 => FieldKind::Int(IntWidth::W32),
    i64 => FieldKind::Int(IntWidth::W64),
    isize => FieldKind::Int(IntWidth::W64),
    u8 => FieldKind::Uint(IntWidth::W32),
    u16 => FieldKind::Uint(IntWidth::W32),
    u32 => FieldKind::Uint(IntWidth::W32),
    u64 => FieldKind::Uint(IntWidth::W64),
    usize => FieldKind::Uint(IntWidth::W64),
    f32 => FieldKind::Float(FloatWidth::Single),
    f64 => FieldKind::Float(FloatWidth::Double),
}

/// `Option<T>` is transparent apart from marking the usage site nullable.
impl<T: ApiSchema> ApiSchema for Option<T> {
    fn schema_name() -> Option<&'static str> {
        T::schema_name()
    }

    fn field_kind() -> FieldKind {
        T::field_kind()
    }

    fn shape() -> TypeShape {
        T::shape()
    }

    fn is_array() -> bool {
        T::is_array()
    }

    fn is_nullable() -> bool {
        true
    }
}

macro_rules! impl_pointer {
    ($($ptr:ident),* $(,)?) => {
        $(
            /// Pointer wrappers are unwrapped to the pointee type.
            impl<T: ApiSchema + ?Sized> ApiSchema for $ptr<T> {
                fn schema_name() -> Option<&'static str> {
                    T::schema_name()
                }

                fn field_kind() -> FieldKind {
                    T::field_kind()
                }

                fn shape() -> TypeShape {
                    T::shape()
                }

                fn is_array() -> bool {
                    T::is_array()
                }

                fn is_nullable() -> bool {
                    T::is_nullable()
                }
            }
        )*
    };
}

impl_pointer!(Box, Rc, Arc);

/// Sequences delegate shape and name to the element type; array-ness is
/// reported through [`ApiSchema::is_array`].
impl<T: ApiSchema> ApiSchema for Vec<T> {
    fn schema_name() -> Option<&'static str> {
        T::schema_name()
    }

    fn field_kind() -> FieldKind {
        FieldKind::Array(Box::new(T::field_kind()))
    }

    fn shape() -> TypeShape {
        T::shape()
    }

    fn is_array() -> bool {
        true
    }
}

impl<T: ApiSchema, const N: usize> ApiSchema for [T; N] {
    fn schema_name() -> Option<&'static str> {
        T::schema_name()
    }

    fn field_kind() -> FieldKind {
        FieldKind::Array(Box::new(T::field_kind()))
    }

    fn shape() -> TypeShape {
        T::shape()
    }

    fn is_array() -> bool {
        true
    }
}

/// String-keyed maps are free-form objects with no declared fields.
impl<K, V> ApiSchema for HashMap<K, V> {
    fn field_kind() -> FieldKind {
        FieldKind::Object(Vec::new())
    }
}

impl<K, V> ApiSchema for BTreeMap<K, V> {
    fn field_kind() -> FieldKind {
        FieldKind::Object(Vec::new())
    }
}

/// Untyped JSON values carry no shape information. JSON null is a valid
/// `Value`, so usage sites are nullable and never required.
impl ApiSchema for serde_json::Value {
    fn field_kind() -> FieldKind {
        FieldKind::Unknown
    }

    fn is_nullable() -> bool {
        true
    }
}

impl<Tz: chrono::TimeZone> ApiSchema for chrono::DateTime<Tz> {
    fn field_kind() -> FieldKind {
        FieldKind::DateTime
    }
}

impl ApiSchema for chrono::NaiveDateTime {
    fn field_kind() -> FieldKind {
        FieldKind::DateTime
    }
}
