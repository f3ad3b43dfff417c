//! Opaque, ordered dispatch arguments.

use std::any::Any;
use std::fmt;

struct Arg {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// An ordered list of opaque arguments passed alongside a dispatched path.
///
/// The mux never inspects the arguments; handlers recover them by position
/// and type.
///
/// # Example
///
/// ```rust,ignore
/// let args = args!["hello", 42_u32];
/// assert_eq!(args.get::<&str>(0), Some(&"hello"));
/// assert_eq!(args.first::<u32>(), Some(&42));
/// ```
#[derive(Default)]
pub struct Args {
    items: Vec<Arg>,
}

impl Args {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument.
    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.items.push(Arg {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        });
    }

    /// Append an argument, builder style.
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// The argument at `index`, if present and of type `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.items.get(index)?.value.downcast_ref::<T>()
    }

    /// The first argument of type `T`.
    pub fn first<T: Any>(&self) -> Option<&T> {
        self.items
            .iter()
            .find_map(|arg| arg.value.downcast_ref::<T>())
    }

    /// Type name of the argument at `index`.
    pub fn type_name(&self, index: usize) -> Option<&'static str> {
        self.items.get(index).map(|arg| arg.type_name)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Primitive values print as themselves, everything else by type name.
impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = &*self.value;
        if let Some(v) = value.downcast_ref::<&'static str>() {
            fmt::Debug::fmt(v, f)
        } else if let Some(v) = value.downcast_ref::<String>() {
            fmt::Debug::fmt(v, f)
        } else if let Some(v) = value.downcast_ref::<i64>() {
            fmt::Debug::fmt(v, f)
        } else if let Some(v) = value.downcast_ref::<i32>() {
            fmt::Debug::fmt(v, f)
        } else if let Some(v) = value.downcast_ref::<u64>() {
            fmt::Debug::fmt(v, f)
        } else if let Some(v) = value.downcast_ref::<u32>() {
            fmt::Debug::fmt(v, f)
        } else if let Some(v) = value.downcast_ref::<usize>() {
            fmt::Debug::fmt(v, f)
        } else if let Some(v) = value.downcast_ref::<bool>() {
            fmt::Debug::fmt(v, f)
        } else {
            write!(f, "<{}>", self.type_name)
        }
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

/// Build an [`Args`] list from a sequence of values.
///
/// ```rust,ignore
/// let args = args!["hi", "Tom"];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(
            args.push($value);
        )+
        args
    }};
}
