use std::collections::HashMap;

#[derive(Default)]
pub struct Interner {
    map: HashMap<Box<str>, u32>,
    names: Vec<Box<str>>,
}

impl Interner {
    pub fn intern(&mut self, s: &str) -> super::Symbol {
        if let Some(&idx) = self.map.get(s) {
            return super::Symbol(idx);
        }

        let idx = self.names.len() as u32;
        self.names.push(s.into());
        self.map.insert(s.into(), idx);
        super::Symbol(idx)
    }

    pub fn lookup(&self, idx: u32) -> &str {
        &self.names[idx as usize]
    }
}
