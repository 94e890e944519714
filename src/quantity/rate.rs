use std::ops::Mul;

use crate::quantity::{cost::Pence, energy::KilowattHours};

quantity!(PencePerKilowattHour, "p/kWh");

impl Mul<KilowattHours> for PencePerKilowattHour {
    type Output = Pence;

    fn mul(self, rhs: KilowattHours) -> Self::Output {
        rhs * self
    }
}
