use serde::{Deserialize, Serialize};

use super::room::Room;

/// A named hotel owning its room catalog in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hotel {
    pub name: String,
    #[serde(default)]
    rooms: Vec<Room>,
}

impl Hotel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rooms: Vec::new(),
        }
    }

    /// Appends a room to the catalog. Duplicate numbers are not rejected.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, number: u32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.number == number)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_room_keeps_catalog_order() {
        let mut hotel = Hotel::new("GDE Hotel");
        hotel.add_room(Room::double(8000, 201));
        hotel.add_room(Room::single(5000, 101));

        let numbers: Vec<u32> = hotel.rooms().iter().map(|room| room.number).collect();
        assert_eq!(numbers, vec![201, 101]);
        assert_eq!(hotel.room_count(), 2);
    }

    #[test]
    fn add_room_accepts_duplicate_numbers() {
        let mut hotel = Hotel::new("Twin");
        hotel.add_room(Room::single(5000, 101));
        hotel.add_room(Room::double(9000, 101));

        assert_eq!(hotel.room_count(), 2);
        assert_eq!(hotel.room(101).map(|room| room.price), Some(5000));
        assert!(hotel.room(999).is_none());
    }
}
