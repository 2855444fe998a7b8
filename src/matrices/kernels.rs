//! Matrix-vector kernels over any sparse layout.

use crate::container_error::{ContainerError, Result};
use crate::containers::element::Scalar;
use crate::matrices::segments::SegmentLayout;
use crate::matrices::sparse::SparseMatrix;

impl<V: Scalar, L: SegmentLayout> SparseMatrix<V, L> {
    fn check_operand(&self, expected: usize, found: usize) -> Result<()> {
        if expected != found {
            return Err(ContainerError::ShapeMismatch { expected, found });
        }
        Ok(())
    }

    /// Dot product of `row` with `x`.
    pub fn row_vector_product(&self, row: usize, x: &[V]) -> Result<V> {
        self.check_operand(self.columns(), x.len())?;
        Ok(self
            .row(row)?
            .iter()
            .fold(V::zero(), |acc, (c, v)| acc + v * x[c]))
    }

    /// `y = A x`.
    pub fn vector_product(&self, x: &[V], y: &mut [V]) -> Result<()> {
        self.check_operand(self.columns(), x.len())?;
        self.check_operand(self.rows(), y.len())?;
        for (r, out) in y.iter_mut().enumerate() {
            *out = self.row_vector_product(r, x)?;
        }
        Ok(())
    }

    /// One successive over-relaxation update of `x[row]` for `A x = b`.
    ///
    /// # Errors
    /// [`ContainerError::ZeroDiagonal`] if the diagonal entry is missing or
    /// zero; `x` is left unchanged.
    pub fn perform_sor_iteration(&self, b: &[V], row: usize, x: &mut [V], omega: V) -> Result<()> {
        self.check_operand(self.rows(), b.len())?;
        self.check_operand(self.columns(), x.len())?;
        let entries = self.row(row)?;
        let mut diagonal = V::zero();
        let mut sum = b[row];
        for (c, v) in entries.iter() {
            if c == row {
                diagonal = v;
            } else {
                sum = sum - v * x[c];
            }
        }
        if diagonal.is_zero() {
            return Err(ContainerError::ZeroDiagonal { row });
        }
        x[row] = (V::one() - omega) * x[row] + omega / diagonal * sum;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::container_error::{ContainerError, ErrorKind};
    use crate::matrices::{CsrMatrix, EllpackMatrix};

    fn tridiagonal(n: usize) -> CsrMatrix<f64> {
        let mut m = CsrMatrix::with_dimensions(n, n);
        let caps: Vec<usize> = (0..n).map(|i| if i == 0 || i + 1 == n { 2 } else { 3 }).collect();
        m.set_row_capacities(&caps).unwrap();
        for i in 0..n {
            if i > 0 {
                m.set_element(i, i - 1, -1.0).unwrap();
            }
            m.set_element(i, i, 2.0).unwrap();
            if i + 1 < n {
                m.set_element(i, i + 1, -1.0).unwrap();
            }
        }
        m
    }

    #[test]
    fn matvec() {
        let m = tridiagonal(4);
        let x = [1.0, 2.0, 3.0, 4.0];
        let mut y = [0.0; 4];
        m.vector_product(&x, &mut y).unwrap();
        assert_eq!(y, [0.0, 0.0, 0.0, 5.0]);
        assert_eq!(m.row_vector_product(3, &x).unwrap(), 5.0);
        let e = m.vector_product(&x[..3], &mut y).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Shape);
    }

    #[test]
    fn sor_converges_on_diagonally_dominant_system() {
        let m = tridiagonal(5);
        let expected = [1.0, -2.0, 0.5, 3.0, 1.0];
        let mut b = [0.0; 5];
        m.vector_product(&expected, &mut b).unwrap();
        let mut x = [0.0; 5];
        for _ in 0..500 {
            for r in 0..5 {
                m.perform_sor_iteration(&b, r, &mut x, 1.2).unwrap();
            }
        }
        for (a, e) in x.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{a} vs {e}");
        }
    }

    #[test]
    fn sor_rejects_missing_diagonal() {
        let mut m = EllpackMatrix::<f64>::with_dimensions(2, 2);
        m.set_row_capacities(&[1, 1]).unwrap();
        m.set_element(0, 1, 1.0).unwrap();
        m.set_element(1, 1, 1.0).unwrap();
        let mut x = [7.0, 0.0];
        let e = m.perform_sor_iteration(&[1.0, 1.0], 0, &mut x, 1.0).unwrap_err();
        assert_eq!(e, ContainerError::ZeroDiagonal { row: 0 });
        assert_eq!(x[0], 7.0);
        m.perform_sor_iteration(&[1.0, 1.0], 1, &mut x, 1.0).unwrap();
        assert_eq!(x[1], 1.0);
    }
}
