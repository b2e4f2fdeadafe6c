use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::FromIterator;
use std::rc::Rc;

use crate::parser::ast::Stmt;
use crate::runner::ds::env::EvalContext;
use crate::runner::ds::error::ScriptError;

/// Native function installed in the builtin namespace.
pub type BuiltinFn = fn(&mut EvalContext, Vec<Value>) -> Result<Value, ScriptError>;

/// Every value a script can produce or hold. Containers have value
/// semantics; assignment and argument passing clone them.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Dict(Dict),
    Set(Set),
    Func(Rc<FuncData>),
    Builtin(Builtin),
}

/// Script defined function: shared AST, no captured environment. A call
/// sees its own locals plus the globals.
#[derive(Debug)]
pub struct FuncData {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::Func(_) => "function",
            Value::Builtin(_) => "builtin",
        }
    }

    /// Source-like rendering: strings come back quoted and escaped, which
    /// is also how container elements print.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.repr()).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Tuple(items) => match items.len() {
                0 => "()".to_string(),
                1 => format!("({},)", items[0].repr()),
                _ => {
                    let parts: Vec<String> = items.iter().map(|v| v.repr()).collect();
                    format!("({})", parts.join(", "))
                }
            },
            Value::Dict(dict) => {
                if dict.is_empty() {
                    return "{}".to_string();
                }
                let parts: Vec<String> = dict
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.repr(), v.repr()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Set(set) => {
                // There is no empty set literal, so none would read back in.
                if set.is_empty() {
                    return "set()".to_string();
                }
                let parts: Vec<String> = set.iter().map(|v| v.repr()).collect();
                format!("{{{}}}", parts.join(", "))
            }
            other => other.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Func(func) => write!(f, "<function {}>", func.name),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
            container => write!(f, "{}", container.repr()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Keeps a float readable as one: whole values still show a fractional
/// digit, so `6 / 2` prints as `3.0` rather than `3`.
fn format_float(x: f64) -> String {
    if x.is_finite() && x == x.trunc() && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// Insertion ordered key to value mapping. Keys compare by script
/// equality, so `1` and `1.0` are the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
    entries: Vec<(Value, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Dict { entries: vec![] }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| script_equals(k, key))
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| script_equals(k, key))
            .map(|(_, v)| v)
    }

    /// Replacing a present key keeps its original position.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.iter().any(|(k, _)| script_equals(k, key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl FromIterator<(Value, Value)> for Dict {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        let mut dict = Dict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

/// Insertion ordered collection of distinct values, distinct by script
/// equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Set {
    items: Vec<Value>,
}

impl Set {
    pub fn new() -> Self {
        Set { items: vec![] }
    }

    /// Re-inserting a present value is a no-op; first insertion wins the
    /// position.
    pub fn insert(&mut self, value: Value) {
        if !self.contains(&value) {
            self.items.push(value);
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|item| script_equals(item, value))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

impl FromIterator<Value> for Set {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut set = Set::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Equality as scripts see it through `==`. Ints and floats compare by
/// numeric value, bools equal only bools, dicts and sets ignore insertion
/// order, and functions compare by identity.
pub fn script_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::None, Value::None) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| script_equals(x, y))
        }
        (Value::Dict(a), Value::Dict(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).map_or(false, |other| script_equals(v, other)))
        }
        (Value::Set(a), Value::Set(b)) => {
            a.len() == b.len() && a.iter().all(|item| b.contains(item))
        }
        (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
        (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
        _ => false,
    }
}

/// Truthiness as conditions see it: empties, zeros and `none` are false,
/// everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::None => false,
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Float(x) => *x != 0.0,
        Value::Str(s) => !s.is_empty(),
        Value::List(items) | Value::Tuple(items) => !items.is_empty(),
        Value::Dict(dict) => !dict.is_empty(),
        Value::Set(set) => !set.is_empty(),
        Value::Func(_) | Value::Builtin(_) => true,
    }
}
