use std::ops::Div;

quantity!(Pence, "p");

impl Div<f64> for Pence {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}
