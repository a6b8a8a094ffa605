//! Type-erased values and their type tags.
//!
//! Everything that flows between steps is a [`Value`]: a cheaply clonable
//! handle to any [`StepValue`] together with the [`TypeTag`] it was stored
//! under. Steps declare the tags of their parameters and returns up front,
//! so the engine never needs runtime reflection.
//!
//! # Example
//!
//! ```
//! use stepchain::value::{TypeTag, Value};
//!
//! let value = Value::new(String::from("hello"));
//! assert_eq!(value.tag(), TypeTag::of::<String>());
//! assert_eq!(value.get::<String>(), Some("hello".to_string()));
//! assert_eq!(value.get::<i64>(), None);
//! ```

pub mod store;

pub use store::ValueStore;

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;

/// Explicit type token used to index stored values.
///
/// Two tags are equal when they describe the same Rust type; the name is
/// carried only for messages.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for the type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type name, as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is the tag of [`Value`] itself, the "any value" parameter type.
    pub fn is_dynamic(&self) -> bool {
        self.id == TypeId::of::<Value>()
    }

    /// Whether a value stored under `actual` can be passed where `self` is declared.
    pub fn accepts(&self, actual: &TypeTag) -> bool {
        self.is_dynamic() || self == actual
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

trait DynValue: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync + fmt::Debug> DynValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type-erased value produced by a step or supplied as an initial input.
///
/// Cloning a `Value` is cheap: the payload is shared.
#[derive(Clone)]
pub struct Value {
    tag: TypeTag,
    inner: Arc<dyn DynValue>,
}

impl Value {
    /// Wrap a step value.
    pub fn new<T: StepValue>(value: T) -> Self {
        value.into_value()
    }

    fn from_raw<T: Any + Send + Sync + fmt::Debug>(value: T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            inner: Arc::new(value),
        }
    }

    /// The tag this value is stored under.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Name of the payload type.
    pub fn type_name(&self) -> &'static str {
        self.tag.name()
    }

    /// Whether the payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.payload().is::<T>()
    }

    /// Borrow the payload as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload().downcast_ref::<T>()
    }

    // Deref first: the Arc itself would also satisfy `DynValue`.
    fn payload(&self) -> &dyn Any {
        (*self.inner).as_any()
    }

    /// Clone the payload out as a `T`.
    pub fn get<T: StepValue>(&self) -> Option<T> {
        T::from_value(self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

/// Types that can be passed between steps.
///
/// Implemented for common standard library types. Use [`step_value!`](crate::step_value)
/// to opt in your own types:
///
/// ```
/// #[derive(Debug, Clone)]
/// struct Order {
///     id: u64,
/// }
///
/// stepchain::step_value!(Order);
///
/// let value = stepchain::Value::new(Order { id: 7 });
/// assert_eq!(value.get::<Order>().map(|o| o.id), Some(7));
/// ```
pub trait StepValue: Any + Clone + Send + Sync + fmt::Debug {
    /// Tag under which values of this type are stored and requested.
    fn type_tag() -> TypeTag {
        TypeTag::of::<Self>()
    }

    /// Erase the value.
    fn into_value(self) -> Value {
        Value::from_raw(self)
    }

    /// Recover a value of this type, if `value` holds one.
    fn from_value(value: &Value) -> Option<Self> {
        value.downcast_ref::<Self>().cloned()
    }
}

/// A `Value` parameter accepts any stored value; returning a `Value` stores
/// it under its payload's own tag.
impl StepValue for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// Implement [`StepValue`] for one or more types.
#[macro_export]
macro_rules! step_value {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::value::StepValue for $ty {})+
    };
}

step_value!(
    String,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    PathBuf,
    serde_json::Value,
);

impl<T: StepValue> StepValue for Vec<T> {}

impl<T: StepValue> StepValue for Option<T> {}
