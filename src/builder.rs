use std::{borrow::Cow, fmt};

use serde::Serialize;
use serde_json::Value;

use crate::{
    api::{get_cookie, get_cookie_decoded, set_cookie},
    error::Result,
    expires::Expiration,
    jar::CookieJar,
    options::CookieOptions,
};

/// A value to store in a cookie.
///
/// Primitives are stored as their text; anything else is stored as compact JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum CookieValue {
    Primitive(String),
    Structured(Value),
}

impl CookieValue {
    /// Serialize any value into a cookie value.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// The text stored in the cookie.
    pub fn into_text(self) -> String {
        match self {
            Self::Primitive(text) => text,
            Self::Structured(value) => value.to_string(),
        }
    }
}

fn number_text(number: f64) -> String {
    if number.is_infinite() {
        let sign = if number.is_sign_negative() { "-" } else { "" };
        format!("{sign}Infinity")
    } else {
        number.to_string()
    }
}

impl From<&str> for CookieValue {
    fn from(value: &str) -> Self {
        Self::Primitive(value.to_owned())
    }
}

impl From<String> for CookieValue {
    fn from(value: String) -> Self {
        Self::Primitive(value)
    }
}

impl From<&String> for CookieValue {
    fn from(value: &String) -> Self {
        Self::Primitive(value.clone())
    }
}

impl From<bool> for CookieValue {
    fn from(value: bool) -> Self {
        Self::Primitive(value.to_string())
    }
}

impl From<f64> for CookieValue {
    fn from(value: f64) -> Self {
        Self::Primitive(number_text(value))
    }
}

impl From<f32> for CookieValue {
    fn from(value: f32) -> Self {
        Self::Primitive(number_text(f64::from(value)))
    }
}

macro_rules! primitive_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CookieValue {
                fn from(value: $ty) -> Self {
                    Self::Primitive(value.to_string())
                }
            }
        )*
    };
}

primitive_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<Value> for CookieValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Primitive(text),
            Value::Bool(flag) => Self::Primitive(flag.to_string()),
            Value::Number(number) if number.is_f64() => {
                Self::Primitive(number.as_f64().map_or_else(|| number.to_string(), number_text))
            }
            Value::Number(number) => Self::Primitive(number.to_string()),
            other => Self::Structured(other),
        }
    }
}

/// A single cookie, built up with setters and written to a jar by [`Cookie::save`].
///
/// Nothing touches the jar until `save` is called; `save` can be called again after further
/// changes to overwrite the stored cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    options: CookieOptions,
}

impl Cookie {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<CookieValue>,
    {
        Self::with_options(name, value, CookieOptions::default())
    }

    pub fn with_options<N, V>(name: N, value: V, options: CookieOptions) -> Self
    where
        N: Into<String>,
        V: Into<CookieValue>,
    {
        Self {
            name: name.into(),
            value: value.into().into_text(),
            options,
        }
    }

    /// Load an existing cookie, falling back to `default` as its value.
    ///
    /// Returns `None` when the cookie is missing and no non-empty default is given.
    pub fn get<J: CookieJar + ?Sized>(jar: &J, name: &str, default: Option<&str>) -> Option<Self> {
        get_cookie(jar, name, None)
            .or_else(|| non_empty(default))
            .map(|value| Self::new(name, value))
    }

    /// Like [`Cookie::get`], but base64-decodes the stored value. The default is used as-is.
    pub fn get_decoded<J: CookieJar + ?Sized>(
        jar: &J,
        name: &str,
        default: Option<&str>,
    ) -> Result<Option<Self>> {
        let value = get_cookie_decoded(jar, name, None)?.filter(|value| !value.is_empty());
        Ok(value
            .or_else(|| non_empty(default))
            .map(|value| Self::new(name, value)))
    }

    pub fn set_name<N: Into<String>>(&mut self, name: N) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_value<V: Into<CookieValue>>(&mut self, value: V) -> &mut Self {
        self.value = value.into().into_text();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_path<P: Into<Cow<'static, str>>>(&mut self, path: P) -> &mut Self {
        self.options.path = path.into();
        self
    }

    pub fn path(&self) -> &str {
        self.options.path()
    }

    pub fn set_domain<D: Into<Cow<'static, str>>>(&mut self, domain: D) -> &mut Self {
        self.options.domain = domain.into();
        self
    }

    pub fn domain(&self) -> &str {
        self.options.domain()
    }

    pub fn set_exp_date<E: Into<Expiration>>(&mut self, exp_date: E) -> &mut Self {
        self.options.expiration = Some(exp_date.into());
        self
    }

    pub fn clear_exp_date(&mut self) -> &mut Self {
        self.options.expiration = None;
        self
    }

    pub fn exp_date(&self) -> Option<&Expiration> {
        self.options.expiration()
    }

    pub fn set_max_age(&mut self, max_age: i64) -> &mut Self {
        self.options.max_age = max_age;
        self
    }

    pub fn max_age(&self) -> i64 {
        self.options.max_age()
    }

    pub fn set_secure(&mut self, secure: bool) -> &mut Self {
        self.options.secure = secure;
        self
    }

    pub fn is_secure(&self) -> bool {
        self.options.secure()
    }

    pub fn set_encode(&mut self, encode: bool) -> &mut Self {
        self.options.encode = encode;
        self
    }

    pub fn is_encoded(&self) -> bool {
        self.options.encode()
    }

    pub fn options(&self) -> &CookieOptions {
        &self.options
    }

    /// Write the cookie to the jar.
    pub fn save<J: CookieJar + ?Sized>(&self, jar: &J) -> Result<()> {
        set_cookie(jar, &self.name, &self.value, &self.options)
    }
}

/// Renders the cookie string [`Cookie::save`] writes. The name is not validated.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.options.build_cookie(&self.name, &self.value))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_owned)
}
