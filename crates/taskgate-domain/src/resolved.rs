//! `ResolvedTaskResources`: el Task ya resuelto junto a los recursos que el
//! TaskRun entrega, indexados por nombre.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::resource::ResourceBinding;
use crate::task::{Task, TaskSpec};
use crate::task_run::{TaskResourceBinding, TaskRun};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedTaskResources {
    pub task_name: String,
    pub task_spec: TaskSpec,
    #[serde(default)]
    pub inputs: IndexMap<String, ResourceBinding>,
    #[serde(default)]
    pub outputs: IndexMap<String, ResourceBinding>,
}

impl ResolvedTaskResources {
    /// Combina un Task y un TaskRun. Si el TaskRun trae spec embebida, ésta
    /// reemplaza a la del Task. Un nombre de recurso repetido conserva el
    /// último enlace.
    pub fn resolve(task: &Task, run: &TaskRun) -> Self {
        let task_spec = run.spec.task_spec.clone().unwrap_or_else(|| task.spec.clone());
        let (inputs, outputs) = match &run.spec.resources {
            Some(r) => (index_bindings(&r.inputs), index_bindings(&r.outputs)),
            None => (IndexMap::new(), IndexMap::new()),
        };
        Self { task_name: task.name.clone(),
               task_spec,
               inputs,
               outputs }
    }
}

fn index_bindings(bindings: &[TaskResourceBinding]) -> IndexMap<String, ResourceBinding> {
    let mut out = IndexMap::with_capacity(bindings.len());
    for b in bindings {
        out.insert(b.name.clone(), b.resource.clone());
    }
    out
}
