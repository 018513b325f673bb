mod stick;
