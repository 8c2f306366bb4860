use std::fmt;

pub const MENU_HEADER: &str = "---- MAIN MENU ----";
pub const CHOICE_PROMPT: &str = "Enter your choice: ";

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    Deposit,
    Withdraw,
    Balance,
    MiniStatement,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuParseError {
    #[error("Invalid input! Please enter a number between 1 and 6.")]
    NotANumber,
    #[error("Invalid choice! Please select 1–6.")]
    OutOfRange,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Register,
        MenuChoice::Deposit,
        MenuChoice::Withdraw,
        MenuChoice::Balance,
        MenuChoice::MiniStatement,
        MenuChoice::Exit,
    ];

    /// Parse a raw menu line. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, MenuParseError> {
        let number: i64 = raw.trim().parse().map_err(|_| MenuParseError::NotANumber)?;
        match number {
            1 => Ok(MenuChoice::Register),
            2 => Ok(MenuChoice::Deposit),
            3 => Ok(MenuChoice::Withdraw),
            4 => Ok(MenuChoice::Balance),
            5 => Ok(MenuChoice::MiniStatement),
            6 => Ok(MenuChoice::Exit),
            _ => Err(MenuParseError::OutOfRange),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::Register => 1,
            MenuChoice::Deposit => 2,
            MenuChoice::Withdraw => 3,
            MenuChoice::Balance => 4,
            MenuChoice::MiniStatement => 5,
            MenuChoice::Exit => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Register => "New Registration",
            MenuChoice::Deposit => "Deposit Money",
            MenuChoice::Withdraw => "Withdraw Money",
            MenuChoice::Balance => "Check Balance",
            MenuChoice::MiniStatement => "Mini Statement",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.number(), self.label())
    }
}
