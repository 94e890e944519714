use std::ops::Mul;

use crate::quantity::{cost::Pence, rate::PencePerKilowattHour};

quantity!(KilowattHours, "kWh");

impl Mul<PencePerKilowattHour> for KilowattHours {
    type Output = Pence;

    fn mul(self, rhs: PencePerKilowattHour) -> Self::Output {
        Pence(self.0 * rhs.0)
    }
}
