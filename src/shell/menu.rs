/// Menu text, re-printed before every choice.
pub const MENU: &str = "
1. Add a note
2. List all notes
3. Read a note
4. Update a note
5. Delete a note
6. Exit

";

/// The six transitions out of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Read,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    /// Maps the exact menu number to a choice. Anything else is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Read),
            "4" => Some(MenuChoice::Update),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}
