//! Vector: an [`Array`] with element-wise arithmetic and reductions.
//!
//! Operator traits (`+`, `-`, `*`, `/` and their compound forms) panic when
//! the operands differ in size, like slice indexing does; the `try_*` methods
//! report the mismatch as [`ContainerError::ShapeMismatch`] instead.

use std::ops::{
    Add, AddAssign, Deref, DerefMut, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

use num_traits::Float;

use crate::container_error::{ContainerError, Result};
use crate::containers::array::Array;
use crate::containers::element::Scalar;

/// Owned numeric vector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector<V: Scalar>(Array<V>);

impl<V: Scalar> Vector<V> {
    pub fn new() -> Self {
        Self(Array::new())
    }

    pub fn with_size(size: isize) -> Result<Self> {
        Array::with_size(size).map(Self)
    }

    pub fn with_value(size: isize, value: V) -> Result<Self> {
        Array::with_value(size, value).map(Self)
    }

    pub fn into_array(self) -> Array<V> {
        self.0
    }

    fn check_len(&self, other: &[V]) -> Result<()> {
        if self.size() != other.len() {
            return Err(ContainerError::ShapeMismatch {
                expected: self.size(),
                found: other.len(),
            });
        }
        Ok(())
    }

    /// `self += other`, or a shape error if the sizes differ.
    pub fn try_add_assign(&mut self, other: &[V]) -> Result<()> {
        self.check_len(other)?;
        self.zip_apply(other, |a, b| a + b);
        Ok(())
    }

    /// `self -= other`, or a shape error if the sizes differ.
    pub fn try_sub_assign(&mut self, other: &[V]) -> Result<()> {
        self.check_len(other)?;
        self.zip_apply(other, |a, b| a - b);
        Ok(())
    }

    /// `self += alpha * other` (axpy).
    pub fn add_scaled(&mut self, alpha: V, other: &[V]) -> Result<()> {
        self.check_len(other)?;
        self.zip_apply(other, |a, b| a + alpha * b);
        Ok(())
    }

    /// Scalar product with `other`.
    pub fn dot(&self, other: &[V]) -> Result<V> {
        self.check_len(other)?;
        Ok(self
            .iter()
            .zip(other)
            .fold(V::zero(), |acc, (&a, &b)| acc + a * b))
    }

    pub fn sum(&self) -> V {
        self.iter().fold(V::zero(), |acc, &a| acc + a)
    }

    /// Largest element, `None` for an empty vector.
    pub fn max(&self) -> Option<V> {
        self.iter()
            .copied()
            .reduce(|m, a| if a > m { a } else { m })
    }

    /// Smallest element, `None` for an empty vector.
    pub fn min(&self) -> Option<V> {
        self.iter()
            .copied()
            .reduce(|m, a| if a < m { a } else { m })
    }

    fn zip_apply(&mut self, other: &[V], f: impl Fn(V, V) -> V) {
        for (a, &b) in self.0.iter_mut().zip(other) {
            *a = f(*a, b);
        }
    }

    fn map_apply(&mut self, f: impl Fn(V) -> V) {
        for a in self.0.iter_mut() {
            *a = f(*a);
        }
    }
}

impl<V: Scalar + Float> Vector<V> {
    pub fn l1_norm(&self) -> V {
        self.iter().fold(V::zero(), |acc, &a| acc + a.abs())
    }

    pub fn l2_norm(&self) -> V {
        self.iter().fold(V::zero(), |acc, &a| acc + a * a).sqrt()
    }

    pub fn max_norm(&self) -> V {
        self.iter().fold(V::zero(), |acc, &a| acc.max(a.abs()))
    }
}

impl<V: Scalar> Deref for Vector<V> {
    type Target = Array<V>;
    fn deref(&self) -> &Array<V> {
        &self.0
    }
}

impl<V: Scalar> DerefMut for Vector<V> {
    fn deref_mut(&mut self) -> &mut Array<V> {
        &mut self.0
    }
}

impl<V: Scalar> From<Array<V>> for Vector<V> {
    fn from(a: Array<V>) -> Self {
        Self(a)
    }
}

impl<V: Scalar> From<Vec<V>> for Vector<V> {
    fn from(v: Vec<V>) -> Self {
        Self(Array::from(v))
    }
}

impl<V: Scalar> FromIterator<V> for Vector<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Scalar> std::fmt::Display for Vector<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

macro_rules! impl_vector_ops {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl<V: Scalar> $OpAssign<&Vector<V>> for Vector<V> {
            /// # Panics
            /// If the sizes differ.
            fn $op_assign(&mut self, rhs: &Vector<V>) {
                assert_eq!(self.size(), rhs.size(), "vector sizes differ");
                self.zip_apply(rhs.as_slice(), |a, b| a.$op(b));
            }
        }

        impl<V: Scalar> $OpAssign<V> for Vector<V> {
            fn $op_assign(&mut self, rhs: V) {
                self.map_apply(|a| a.$op(rhs));
            }
        }

        impl<V: Scalar> $Op<&Vector<V>> for &Vector<V> {
            type Output = Vector<V>;
            fn $op(self, rhs: &Vector<V>) -> Vector<V> {
                let mut out = self.clone();
                out.$op_assign(rhs);
                out
            }
        }

        impl<V: Scalar> $Op<&Vector<V>> for Vector<V> {
            type Output = Vector<V>;
            fn $op(mut self, rhs: &Vector<V>) -> Vector<V> {
                self.$op_assign(rhs);
                self
            }
        }

        impl<V: Scalar> $Op<V> for &Vector<V> {
            type Output = Vector<V>;
            fn $op(self, rhs: V) -> Vector<V> {
                let mut out = self.clone();
                out.$op_assign(rhs);
                out
            }
        }

        impl<V: Scalar> $Op<V> for Vector<V> {
            type Output = Vector<V>;
            fn $op(mut self, rhs: V) -> Vector<V> {
                self.$op_assign(rhs);
                self
            }
        }
    };
}

impl_vector_ops!(Add, add, AddAssign, add_assign);
impl_vector_ops!(Sub, sub, SubAssign, sub_assign);
impl_vector_ops!(Mul, mul, MulAssign, mul_assign);
impl_vector_ops!(Div, div, DivAssign, div_assign);

impl<V: Scalar + Neg<Output = V>> Neg for Vector<V> {
    type Output = Vector<V>;
    fn neg(mut self) -> Vector<V> {
        self.map_apply(|a| -a);
        self
    }
}

impl<V: Scalar + Neg<Output = V>> Neg for &Vector<V> {
    type Output = Vector<V>;
    fn neg(self) -> Vector<V> {
        -self.clone()
    }
}
