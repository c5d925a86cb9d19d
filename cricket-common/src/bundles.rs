use crate::side::TeamSide;
use core::ops::Index;
use derivative::Derivative;
use serde::{Deserialize, Serialize};

#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamBundle<T> {
    pub team1: T,
    pub team2: T,
}

impl<T> TeamBundle<T> {
    pub fn iter(&self) -> impl Iterator<Item = (TeamSide, &T)> {
        self.into_iter()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> TeamBundle<U> {
        TeamBundle {
            team1: f(self.team1),
            team2: f(self.team2),
        }
    }
}

impl<T> Index<TeamSide> for TeamBundle<T> {
    type Output = T;

    fn index(&self, side: TeamSide) -> &Self::Output {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }
}

pub struct TeamBundleIterator<'a, T> {
    bundle: &'a TeamBundle<T>,
    index: usize,
}

impl<'a, T> Iterator for TeamBundleIterator<'a, T> {
    type Item = (TeamSide, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let value = match self.index {
            0 => (TeamSide::Team1, &self.bundle.team1),
            1 => (TeamSide::Team2, &self.bundle.team2),
            _ => return None,
        };

        self.index += 1;
        Some(value)
    }
}

impl<'a, T> IntoIterator for &'a TeamBundle<T> {
    type Item = (TeamSide, &'a T);
    type IntoIter = TeamBundleIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        TeamBundleIterator {
            bundle: self,
            index: 0,
        }
    }
}

impl<T> TeamBundle<Option<T>> {
    pub fn complete(self) -> Option<TeamBundle<T>> {
        Some(TeamBundle {
            team1: self.team1?,
            team2: self.team2?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_index_and_iter() {
        let bundle = TeamBundle {
            team1: "India",
            team2: "Australia",
        };
        assert_eq!(bundle[TeamSide::Team1], "India");
        assert_eq!(bundle[TeamSide::Team2], "Australia");
        assert_eq!(
            bundle.iter().collect::<Vec<_>>(),
            vec![(TeamSide::Team1, &"India"), (TeamSide::Team2, &"Australia")]
        );
    }

    #[test]
    fn test_complete() {
        let full = TeamBundle {
            team1: Some(1),
            team2: Some(2),
        };
        assert_eq!(full.complete(), Some(TeamBundle { team1: 1, team2: 2 }));

        let partial = TeamBundle {
            team1: Some(1),
            team2: None,
        };
        assert_eq!(partial.complete(), None);
    }

    #[test]
    fn test_map() {
        let bundle = TeamBundle {
            team1: 3u32,
            team2: 4u32,
        };
        assert_eq!(bundle.map(|v| v * 2), TeamBundle { team1: 6, team2: 8 });
        assert_eq!(bundle[TeamSide::Team2], 4);
    }
}
