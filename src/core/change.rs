use winsys::event::ToggleAction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
    Reverse,
}

impl From<bool> for Toggle {
    #[inline(always)]
    fn from(toggle: bool) -> Self {
        match toggle {
            true => Toggle::On,
            false => Toggle::Off,
        }
    }
}

impl From<ToggleAction> for Toggle {
    #[inline(always)]
    fn from(action: ToggleAction) -> Self {
        match action {
            ToggleAction::Add => Toggle::On,
            ToggleAction::Remove => Toggle::Off,
            ToggleAction::Toggle => Toggle::Reverse,
        }
    }
}

impl Toggle {
    #[inline(always)]
    pub fn eval(
        self,
        current: bool,
    ) -> bool {
        match self {
            Toggle::On => true,
            Toggle::Off => false,
            Toggle::Reverse => !current,
        }
    }
}
