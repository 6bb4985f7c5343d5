//! Named, iteration-indexed test parameters.
//!
//! A [`ParameterSet`] declares how many iterations a case runs and holds one value array
//! per key. Arrays are typed when registered (see [`ParamElement`]) and are checked
//! against the iteration count when the set is built, so indexed lookups during a run
//! stay in bounds.

use std::collections::HashSet;

use crate::error::Error;

/// The values registered under one key.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValues {
    /// Signed integers.
    Int(Vec<i64>),
    /// Floating-point numbers.
    Float(Vec<f64>),
    /// Strings.
    Str(Vec<String>),
    /// Booleans.
    Bool(Vec<bool>),
    /// Byte strings.
    Bytes(Vec<Vec<u8>>),
}

impl ParamValues {
    /// Returns the number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Str(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Bytes(v) => v.len(),
        }
    }

    /// Returns whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the name of the element type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// An element type that can be stored in a [`ParameterSet`].
pub trait ParamElement: Clone + Sized + 'static {
    /// Wraps a vector of elements.
    fn into_values(values: Vec<Self>) -> ParamValues;

    /// Borrows the elements back, if `values` holds this element type.
    fn as_slice(values: &ParamValues) -> Option<&[Self]>;
}

macro_rules! impl_param_element {
    ($t:ty, $variant:ident) => {
        impl ParamElement for $t {
            fn into_values(values: Vec<Self>) -> ParamValues {
                ParamValues::$variant(values)
            }

            fn as_slice(values: &ParamValues) -> Option<&[Self]> {
                match values {
                    ParamValues::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }
        }
    };
}

impl_param_element!(i64, Int);
impl_param_element!(f64, Float);
impl_param_element!(String, Str);
impl_param_element!(bool, Bool);
impl_param_element!(Vec<u8>, Bytes);

/// A key and its value array.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    key: String,
    values: ParamValues,
}

impl Parameter {
    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the values.
    pub const fn values(&self) -> &ParamValues {
        &self.values
    }
}

/// Ordered parameters plus the number of iterations they drive.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    iteration_count: usize,
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    /// Starts building a set that drives `iteration_count` iterations.
    pub const fn builder(iteration_count: usize) -> ParameterSetBuilder {
        ParameterSetBuilder {
            iteration_count,
            parameters: vec![],
        }
    }

    /// Returns the declared number of iterations.
    pub const fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    /// Looks up the values registered under `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValues> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.values)
    }

    /// Looks up the values registered under `key` as elements of type `T`.
    pub fn values<T: ParamElement>(&self, key: &str) -> Option<&[T]> {
        self.get(key).and_then(T::as_slice)
    }

    /// Iterates over the parameters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns whether the set holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Builder for [`ParameterSet`].
#[derive(Clone, Debug)]
pub struct ParameterSetBuilder {
    iteration_count: usize,
    parameters: Vec<Parameter>,
}

impl ParameterSetBuilder {
    /// Adds a parameter.
    #[must_use]
    pub fn param<T: ParamElement>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.parameters.push(Parameter {
            key: key.into(),
            values: T::into_values(values.into_iter().collect()),
        });
        self
    }

    /// Adds a string parameter from anything string-like.
    #[must_use]
    pub fn strings<S: Into<String>>(
        self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.param(key, values.into_iter().map(Into::into))
    }

    /// Validates and builds the set.
    ///
    /// Fails when a key repeats, or when a parameter holds fewer values than the
    /// declared iteration count.
    pub fn build(self) -> Result<ParameterSet, Error> {
        let mut seen = HashSet::new();

        for parameter in &self.parameters {
            if !seen.insert(parameter.key.as_str()) {
                return Err(Error::DuplicateParameter(parameter.key.clone()));
            }

            if parameter.values.len() < self.iteration_count {
                return Err(Error::ParameterTooShort {
                    key: parameter.key.clone(),
                    len: parameter.values.len(),
                    iterations: self.iteration_count,
                });
            }
        }

        Ok(ParameterSet {
            iteration_count: self.iteration_count,
            parameters: self.parameters,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    fn sample() -> Result<ParameterSet, Error> {
        ParameterSet::builder(3)
            .strings("string-inputs", ["a1", "a2", "a3"])
            .param("integer-inputs", [100_i64, 200, 300, 500])
            .param("double-inputs", [1.1_f64, 1.2, 1.3])
            .build()
    }

    #[test]
    fn lookup_by_key_and_type() -> Result<(), Error> {
        let set = sample()?;

        assert_eq!(set.iteration_count(), 3);
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.values::<i64>("integer-inputs"),
            Some([100, 200, 300, 500].as_slice())
        );
        assert_eq!(
            set.values::<String>("string-inputs").map(|v| v[1].as_str()),
            Some("a2")
        );
        assert_eq!(set.get("double-inputs").map(ParamValues::type_name), Some("float"));
        Ok(())
    }

    #[test]
    fn missing_key_or_wrong_type_is_absent() -> Result<(), Error> {
        let set = sample()?;

        assert!(set.get("nope").is_none());
        assert!(set.values::<i64>("string-inputs").is_none());
        assert!(set.values::<bool>("integer-inputs").is_none());
        Ok(())
    }

    #[test]
    fn keys_keep_registration_order() -> Result<(), Error> {
        let keys: Vec<_> = sample()?.iter().map(|p| p.key().to_owned()).collect();
        assert_eq!(keys, ["string-inputs", "integer-inputs", "double-inputs"]);
        Ok(())
    }

    #[test]
    fn too_short_parameter_is_rejected() {
        let result = ParameterSet::builder(4)
            .param("input", [1_i64, 2, 3])
            .build();

        assert!(matches!(
            result,
            Err(Error::ParameterTooShort {
                len: 3,
                iterations: 4,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let result = ParameterSet::builder(1)
            .param("input", [1_i64])
            .param("input", [true])
            .build();

        assert!(matches!(result, Err(Error::DuplicateParameter(key)) if key == "input"));
    }

    #[test]
    fn zero_iterations_accepts_empty_arrays() -> Result<(), Error> {
        let set = ParameterSet::builder(0)
            .param::<Vec<u8>>("blobs", [])
            .build()?;

        assert_eq!(set.get("blobs").map(ParamValues::is_empty), Some(true));
        Ok(())
    }
}
