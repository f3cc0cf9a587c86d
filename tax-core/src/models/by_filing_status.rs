use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// A value held separately for each filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByFilingStatus<T> {
    pub single: T,
    pub married_joint: T,
    pub married_separate: T,
    pub head_of_household: T,
}

impl<T> ByFilingStatus<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedJoint => &self.married_joint,
            FilingStatus::MarriedSeparate => &self.married_separate,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn get_mut(
        &mut self,
        status: FilingStatus,
    ) -> &mut T {
        match status {
            FilingStatus::Single => &mut self.single,
            FilingStatus::MarriedJoint => &mut self.married_joint,
            FilingStatus::MarriedSeparate => &mut self.married_separate,
            FilingStatus::HeadOfHousehold => &mut self.head_of_household,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }
}
